pub mod appointments;
pub mod home;
pub mod login;
pub mod register;
