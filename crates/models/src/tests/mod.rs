/// Entity CRUD and constraint tests against a live PostgreSQL
pub mod crud_tests;
