pub mod root;
pub mod swagger_main;
pub mod todo;
