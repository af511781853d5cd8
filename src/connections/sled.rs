use std::collections::HashMap;
use std::path::Path;

use sled::Db;
use sled::IVec;
use sled::Tree;

use super::ConnectionProvider;
use super::HashConnection;
use crate::error::Result;

/// Embedded backend keeping each named collection in its own sled tree.
#[derive(Clone)]
pub struct SledProvider {
    db: Db,
}

impl SledProvider {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(sled::open(path)?))
    }
}

impl ConnectionProvider for SledProvider {
    type Connection = SledConnection;

    fn acquire(&self) -> Result<SledConnection> {
        Ok(SledConnection {
            db: self.db.clone(),
        })
    }
}

/// A handle sharing the provider's database.
pub struct SledConnection {
    db: Db,
}

// Collections live under a prefix so no handle can name one of sled's own
// trees (such as the default tree, which cannot be dropped).
const TREE_PREFIX: &str = "hash:";

fn tree_name(name: &str) -> String {
    format!("{}{}", TREE_PREFIX, name)
}

impl SledConnection {
    fn tree(&self, name: &str) -> Result<Tree> {
        Ok(self.db.open_tree(tree_name(name))?)
    }

    /// The tree behind `name`, without creating it when it does not exist.
    fn existing_tree(&self, name: &str) -> Result<Option<Tree>> {
        let tree_name = tree_name(name);
        let exists = self
            .db
            .tree_names()
            .iter()
            .any(|existing| &existing[..] == tree_name.as_bytes());
        if exists {
            Ok(Some(self.db.open_tree(tree_name)?))
        } else {
            Ok(None)
        }
    }
}

fn decode(bytes: IVec) -> Result<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

impl HashConnection for SledConnection {
    fn hlen(&mut self, name: &str) -> Result<usize> {
        Ok(self.existing_tree(name)?.map_or(0, |tree| tree.len()))
    }

    fn hexists(&mut self, name: &str, key: &str) -> Result<bool> {
        match self.existing_tree(name)? {
            Some(tree) => Ok(tree.contains_key(key)?),
            None => Ok(false),
        }
    }

    fn hkeys(&mut self, name: &str) -> Result<Vec<String>> {
        match self.existing_tree(name)? {
            Some(tree) => tree.iter().keys().map(|key| decode(key?)).collect(),
            None => Ok(Vec::new()),
        }
    }

    fn hvals(&mut self, name: &str) -> Result<Vec<String>> {
        match self.existing_tree(name)? {
            Some(tree) => tree.iter().values().map(|value| decode(value?)).collect(),
            None => Ok(Vec::new()),
        }
    }

    fn hget(&mut self, name: &str, key: &str) -> Result<Option<String>> {
        match self.existing_tree(name)? {
            Some(tree) => tree.get(key)?.map(decode).transpose(),
            None => Ok(None),
        }
    }

    fn hset(&mut self, name: &str, key: &str, value: &str) -> Result<()> {
        let tree = self.tree(name)?;
        tree.insert(key, value)?;
        tree.flush()?;
        Ok(())
    }

    fn hdel(&mut self, name: &str, key: &str) -> Result<bool> {
        let tree = match self.existing_tree(name)? {
            Some(tree) => tree,
            None => return Ok(false),
        };
        let removed = tree.remove(key)?.is_some();
        tree.flush()?;
        Ok(removed)
    }

    fn hgetall(&mut self, name: &str) -> Result<HashMap<String, String>> {
        match self.existing_tree(name)? {
            Some(tree) => tree
                .iter()
                .map(|entry| -> Result<(String, String)> {
                    let (key, value) = entry?;
                    Ok((decode(key)?, decode(value)?))
                })
                .collect(),
            None => Ok(HashMap::new()),
        }
    }

    fn del(&mut self, name: &str) -> Result<bool> {
        let tree = match self.existing_tree(name)? {
            Some(tree) => tree,
            None => return Ok(false),
        };
        // hdel can leave an empty tree behind; Redis has no empty hashes.
        let existed = !tree.is_empty();
        drop(tree);
        self.db.drop_tree(tree_name(name))?;
        self.db.flush()?;
        Ok(existed)
    }
}
