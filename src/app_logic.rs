pub mod handler;

mod handler_tests;
