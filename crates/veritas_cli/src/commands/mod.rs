pub mod create_student;
pub mod delete_student;
pub mod rebuild;
pub mod upload_doc;
pub mod verify;
