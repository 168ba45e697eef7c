mod check;
mod documents;
