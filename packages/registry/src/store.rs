//! In-memory descriptor registry backed by the path tree.

use twinreg_tree::{Path, PathTree};

use crate::descriptor::{ShellDescriptor, SubmodelDescriptor};
use crate::error::StoreError;

const SHELLS: &str = "shells";

/// Holds registered shell descriptors under `shells/{idShort}`.
///
/// Not internally synchronized; callers serialize writers like any other
/// tree owner.
#[derive(Debug, Clone, Default)]
pub struct DescriptorStore {
    tree: PathTree<ShellDescriptor>,
}

impl DescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn shell_path(id_short: &str) -> Result<Path, StoreError> {
        Ok(Path::try_from_components(vec![
            SHELLS.to_string(),
            id_short.to_string(),
        ])?)
    }

    /// Register or replace a shell descriptor, returning the replaced one.
    pub fn insert(
        &mut self,
        descriptor: ShellDescriptor,
    ) -> Result<Option<ShellDescriptor>, StoreError> {
        let path = Self::shell_path(&descriptor.id_short)?;
        Ok(self.tree.insert(&path, descriptor))
    }

    /// Create-only registration: fails if the id is already taken.
    pub fn create(&mut self, descriptor: ShellDescriptor) -> Result<(), StoreError> {
        let path = Self::shell_path(&descriptor.id_short)?;
        if self.tree.retrieve(&path).is_some() {
            return Err(StoreError::Conflict {
                id: descriptor.id_short,
            });
        }
        self.tree.insert(&path, descriptor);
        Ok(())
    }

    pub fn retrieve(&self, id_short: &str) -> Option<&ShellDescriptor> {
        let path = Self::shell_path(id_short).ok()?;
        self.tree.retrieve(&path)
    }

    /// Descriptor of one submodel beneath a registered shell.
    pub fn retrieve_submodel(
        &self,
        shell_id: &str,
        submodel_id: &str,
    ) -> Option<&SubmodelDescriptor> {
        self.retrieve(shell_id)?.submodel(submodel_id)
    }

    /// All registered shells, in registration order.
    pub fn retrieve_all(&self) -> impl Iterator<Item = &ShellDescriptor> {
        self.tree.flatten()
    }

    /// Registered shells matching a predicate.
    pub fn retrieve_where<'a>(
        &'a self,
        predicate: impl Fn(&ShellDescriptor) -> bool + 'a,
    ) -> impl Iterator<Item = &'a ShellDescriptor> {
        self.tree.retrieve_all(predicate)
    }

    /// Remove a shell registration and everything beneath it.
    pub fn delete(&mut self, id_short: &str) -> Result<ShellDescriptor, StoreError> {
        let path = Self::shell_path(id_short)?;
        let detached = self.tree.delete(&path).map_err(|_| StoreError::NotFound {
            id: id_short.to_string(),
        })?;
        // Pre-order: the detached shell itself is the first value.
        let first = detached.flatten().next().cloned();
        first.ok_or_else(|| StoreError::NotFound {
            id: id_short.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
