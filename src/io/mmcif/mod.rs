mod builder;
mod categories;
mod chem;
mod schema;
mod tokenizer;

pub(crate) mod reader;
