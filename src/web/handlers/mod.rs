pub mod articles;
pub mod bias;
pub mod fetch;
pub mod login;
pub mod sources;
pub mod sports;
pub mod users;
