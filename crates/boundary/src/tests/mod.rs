mod helpers;
mod processor_tests;
