pub mod expense_reader;
pub mod load_reader;
pub mod summary_writer;
