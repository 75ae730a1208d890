mod helpers;
mod designation_tests;
mod reader_tests;
