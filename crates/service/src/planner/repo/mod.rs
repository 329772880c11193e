pub mod memory;
pub mod seaorm;
