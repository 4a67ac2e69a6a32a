pub mod reader_tests;
