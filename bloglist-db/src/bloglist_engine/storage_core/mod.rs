pub mod storage_methods;


use crate::{
    bloglist_engine::{config::Config, storage_core::storage_methods::StorageMethods, types::StoreError},
    utils::items::{Blog, User},
};
use heed3::{
    Database, DatabaseFlags, Env, EnvOpenOptions, PutFlags, RoTxn, RwTxn, byteorder::BE, types::*,
};
use std::{fs, path::Path};
use tracing::{debug, info};

// database names for the different stores
const DB_BLOGS: &str = "blogs"; // blog documents
const DB_USERS: &str = "users"; // user documents
const DB_USERNAMES: &str = "usernames"; // unique username index
const DB_USER_BLOGS: &str = "user_blogs"; // user -> blogs relation

// default LMDB max key size
pub const MAX_KEY_BYTES: usize = 511;

pub type BlogId = u128;
pub type UserId = u128;

pub struct BlogListStorage {
    pub env: Env,

    pub blogs_db: Database<U128<BE>, Bytes>,
    pub users_db: Database<U128<BE>, Bytes>,
    pub usernames_db: Database<Str, U128<BE>>,
    pub user_blogs_db: Database<U128<BE>, U128<BE>>,
}

impl BlogListStorage {
    pub fn new(path: &str, config: &Config) -> Result<BlogListStorage, StoreError> {
        fs::create_dir_all(path).map_err(|e| {
            StoreError::StorageConnectionError(format!("Failed to create {path}:"), e)
        })?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(config.db_map_size())
                .max_dbs(8)
                .max_readers(200)
                .open(Path::new(path))?
        };

        let mut wtxn = env.write_txn()?;

        // Blogs: [blog_id]->[bincode blog without id]
        //        [16 bytes]->[dynamic]
        let blogs_db = env
            .database_options()
            .types::<U128<BE>, Bytes>()
            .name(DB_BLOGS)
            .create(&mut wtxn)?;

        // Users: [user_id]->[bincode user without id]
        //        [16 bytes]->[dynamic]
        let users_db = env
            .database_options()
            .types::<U128<BE>, Bytes>()
            .name(DB_USERS)
            .create(&mut wtxn)?;

        // Usernames: [username]->[user_id]
        // Written with NO_OVERWRITE so a taken username fails the transaction.
        let usernames_db = env
            .database_options()
            .types::<Str, U128<BE>>()
            .name(DB_USERNAMES)
            .create(&mut wtxn)?;

        // User blogs: [user_id]->[blog_id]
        //             [16 bytes]->[16 bytes]
        //
        // DUP_SORT keeps all blogs of a user under a single key.
        // DUP_FIXED drops the per-value length header since every value is 16 bytes.
        let user_blogs_db = env
            .database_options()
            .types::<U128<BE>, U128<BE>>()
            .flags(DatabaseFlags::DUP_SORT | DatabaseFlags::DUP_FIXED)
            .name(DB_USER_BLOGS)
            .create(&mut wtxn)?;

        wtxn.commit()?;
        info!(path, "Opened blog list storage");

        Ok(Self {
            env,
            blogs_db,
            users_db,
            usernames_db,
            user_blogs_db,
        })
    }

    /// Used because in the case the key changes in the future.
    #[must_use]
    #[inline(always)]
    pub fn blog_key(id: &BlogId) -> &u128 {
        id
    }

    #[must_use]
    #[inline(always)]
    pub fn user_key(id: &UserId) -> &u128 {
        id
    }
}

impl StorageMethods for BlogListStorage {
    fn get_blog(&self, txn: &RoTxn, id: &BlogId) -> Result<Blog, StoreError> {
        let blog = match self.blogs_db.get(txn, Self::blog_key(id))? {
            Some(data) => data,
            None => return Err(StoreError::BlogNotFound),
        };
        Ok(Blog::from_bincode_bytes(*id, blog)?)
    }

    fn list_blogs(&self, txn: &RoTxn) -> Result<Vec<Blog>, StoreError> {
        self.blogs_db
            .iter(txn)?
            .map(|result| -> Result<Blog, StoreError> {
                let (id, data) = result?;
                Ok(Blog::from_bincode_bytes(id, data)?)
            })
            .collect()
    }

    fn insert_blog(&self, txn: &mut RwTxn, blog: &Blog) -> Result<(), StoreError> {
        if let Some(user) = blog.user {
            if self.users_db.get(txn, Self::user_key(&user))?.is_none() {
                return Err(StoreError::UserNotFound);
            }
            self.user_blogs_db
                .put(txn, Self::user_key(&user), Self::blog_key(&blog.id))?;
        }
        self.blogs_db.put_with_flags(
            txn,
            PutFlags::NO_OVERWRITE,
            Self::blog_key(&blog.id),
            &blog.to_bincode_bytes()?,
        )?;
        debug!(blog = %blog, "Inserted blog");
        Ok(())
    }

    fn update_blog(&self, txn: &mut RwTxn, blog: &Blog) -> Result<(), StoreError> {
        if self.blogs_db.get(txn, Self::blog_key(&blog.id))?.is_none() {
            return Err(StoreError::BlogNotFound);
        }
        self.blogs_db
            .put(txn, Self::blog_key(&blog.id), &blog.to_bincode_bytes()?)?;
        Ok(())
    }

    fn drop_blog(&self, txn: &mut RwTxn, id: &BlogId) -> Result<bool, StoreError> {
        let blog = match self.get_blog(txn, id) {
            Ok(blog) => blog,
            Err(StoreError::BlogNotFound) => return Ok(false),
            Err(e) => return Err(e),
        };

        if let Some(user) = blog.user {
            self.user_blogs_db
                .delete_one_duplicate(txn, Self::user_key(&user), Self::blog_key(id))?;
        }
        self.blogs_db.delete(txn, Self::blog_key(id))?;
        Ok(true)
    }

    fn get_user(&self, txn: &RoTxn, id: &UserId) -> Result<User, StoreError> {
        let user = match self.users_db.get(txn, Self::user_key(id))? {
            Some(data) => data,
            None => return Err(StoreError::UserNotFound),
        };
        Ok(User::from_bincode_bytes(*id, user)?)
    }

    fn list_users(&self, txn: &RoTxn) -> Result<Vec<User>, StoreError> {
        self.users_db
            .iter(txn)?
            .map(|result| -> Result<User, StoreError> {
                let (id, data) = result?;
                Ok(User::from_bincode_bytes(id, data)?)
            })
            .collect()
    }

    fn find_user_by_username(
        &self,
        txn: &RoTxn,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        // LMDB rejects empty and oversized keys, neither can be stored
        if username.is_empty() || username.len() > MAX_KEY_BYTES {
            return Ok(None);
        }
        match self.usernames_db.get(txn, username)? {
            Some(id) => self.get_user(txn, &id).map(Some),
            None => Ok(None),
        }
    }

    fn insert_user(&self, txn: &mut RwTxn, user: &User) -> Result<(), StoreError> {
        self.usernames_db
            .put_with_flags(
                txn,
                PutFlags::NO_OVERWRITE,
                &user.username,
                Self::user_key(&user.id),
            )
            .map_err(|e| match StoreError::from(e) {
                StoreError::DuplicateKey(_) => {
                    StoreError::DuplicateKey(format!("username `{}`", user.username))
                }
                other => other,
            })?;
        self.users_db.put_with_flags(
            txn,
            PutFlags::NO_OVERWRITE,
            Self::user_key(&user.id),
            &user.to_bincode_bytes()?,
        )?;
        debug!(username = %user.username, "Inserted user");
        Ok(())
    }

    fn user_blog_ids(&self, txn: &RoTxn, id: &UserId) -> Result<Vec<BlogId>, StoreError> {
        match self.user_blogs_db.get_duplicates(txn, Self::user_key(id))? {
            Some(iter) => iter
                .map(|result| result.map(|(_, blog_id)| blog_id).map_err(StoreError::from))
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}
