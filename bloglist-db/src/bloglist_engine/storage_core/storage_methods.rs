use crate::bloglist_engine::storage_core::{BlogId, UserId};
use crate::bloglist_engine::types::StoreError;
use crate::utils::items::{Blog, User};
use heed3::{RoTxn, RwTxn};

pub trait StorageMethods {
    /// Gets a blog for a given blog id
    fn get_blog(&self, txn: &RoTxn, id: &BlogId) -> Result<Blog, StoreError>;

    /// Gets all blogs in key order, which is creation order for generated ids
    fn list_blogs(&self, txn: &RoTxn) -> Result<Vec<Blog>, StoreError>;

    /// Stores a new blog and, if it has an owner, links it to that user.
    ///
    /// Fails with `UserNotFound` if the owner does not exist.
    fn insert_blog(&self, txn: &mut RwTxn, blog: &Blog) -> Result<(), StoreError>;

    /// Overwrites an existing blog. Fails with `BlogNotFound` if it does not exist.
    fn update_blog(&self, txn: &mut RwTxn, blog: &Blog) -> Result<(), StoreError>;

    /// Removes the following from the storage engine:
    /// - The given blog
    /// - The link from its owner to the blog
    ///
    /// Returns `false` if there was nothing to remove.
    fn drop_blog(&self, txn: &mut RwTxn, id: &BlogId) -> Result<bool, StoreError>;

    /// Gets a user for a given user id
    fn get_user(&self, txn: &RoTxn, id: &UserId) -> Result<User, StoreError>;

    fn list_users(&self, txn: &RoTxn) -> Result<Vec<User>, StoreError>;

    fn find_user_by_username(&self, txn: &RoTxn, username: &str)
    -> Result<Option<User>, StoreError>;

    /// Stores a new user. Fails with `DuplicateKey` if the username is taken.
    fn insert_user(&self, txn: &mut RwTxn, user: &User) -> Result<(), StoreError>;

    /// Gets the ids of the blogs owned by a user, in id order
    fn user_blog_ids(&self, txn: &RoTxn, id: &UserId) -> Result<Vec<BlogId>, StoreError>;
}
