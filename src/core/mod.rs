pub mod escape;
pub mod normalizers;
pub mod query;
pub mod scanner;
pub mod serializers;
