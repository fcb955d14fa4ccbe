pub mod printer_tests;
