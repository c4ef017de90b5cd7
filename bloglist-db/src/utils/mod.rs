pub mod group_by;
pub mod id;
pub mod items;
pub mod password;
