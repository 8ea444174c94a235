mod connection_tests;
mod errors_tests;
