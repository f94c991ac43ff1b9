//! Inheritance resolution
//!
//! An object's pairs are read in file order. Two kinds of link pull in
//! properties from other objects:
//!
//! - `instanceof` links are merged eagerly, at the point where they appear,
//!   by reading the target object into the same record.
//! - `parent` links are deferred: the last parent seen on an object becomes
//!   the next hop, and hops are followed after the object itself is read,
//!   until the chain reaches the root object.
//!
//! Ordinary properties are overwritten by whatever is read later, so an
//! ancestor's value replaces the object's own. The name is the exception: the
//! first name read (the object's own) is kept.

use super::PropertyDatabase;
use super::markers::Marker;
use super::types::ObjectProperties;
use crate::error::{Error, Result};
use crate::formats::{AttributeDescriptor, PropValue};

use rayon::prelude::*;
use std::collections::HashSet;

/// State of one `resolve_one` call.
struct Walk {
    /// Object being resolved.
    object_id: usize,
    /// Objects whose pairs are currently being read (instance-of nesting).
    reading: Vec<usize>,
}

impl PropertyDatabase {
    /// Resolve every object from id 1 to [`PropertyDatabase::max_id`]
    ///
    /// Objects without a name are left out. Results are in id order, also
    /// when resolving in parallel.
    ///
    /// # Errors
    /// Returns an error if any object fails to resolve.
    pub fn resolve_all(&self) -> Result<Vec<ObjectProperties>> {
        let max_id = self.max_id();
        tracing::info!(
            "Resolving {} objects{}",
            max_id,
            if self.resolver.parallel { " in parallel" } else { "" }
        );

        let resolved: Vec<Option<ObjectProperties>> = if self.resolver.parallel {
            (1..=max_id)
                .into_par_iter()
                .map(|id| self.resolve_one(id))
                .collect::<Result<_>>()?
        } else {
            (1..=max_id)
                .map(|id| self.resolve_one(id))
                .collect::<Result<_>>()?
        };

        let objects: Vec<ObjectProperties> = resolved.into_iter().flatten().collect();
        tracing::info!("Resolved {} named objects", objects.len());
        Ok(objects)
    }

    /// Resolve the given ids, keeping their order and dropping unnamed or
    /// unknown objects.
    ///
    /// # Errors
    /// Returns an error if any object fails to resolve.
    pub fn resolve_ids(&self, ids: &[usize]) -> Result<Vec<ObjectProperties>> {
        let mut objects = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(object) = self.resolve_one(id)? {
                objects.push(object);
            }
        }
        Ok(objects)
    }

    /// Resolve a single object
    ///
    /// Returns `Ok(None)` for id 0, for ids without an offset entry, and for
    /// objects whose name never resolves.
    ///
    /// # Errors
    /// Returns an error if the tables referenced while walking the object are
    /// inconsistent or if the inheritance links form a cycle.
    pub fn resolve_one(&self, id: usize) -> Result<Option<ObjectProperties>> {
        if id == 0 || !self.offsets.contains(id) {
            return Ok(None);
        }

        let external_id = self.ids.get(id).ok_or(Error::ExternalIdOutOfRange {
            object_id: id,
            len: self.ids.len(),
        })?;

        let mut record = ObjectProperties::new(id, external_id);
        let mut walk = Walk {
            object_id: id,
            reading: Vec::new(),
        };

        let first_hop = self.read_object(id, &mut record, &mut walk)?;
        self.follow_parent_chain(first_hop, &mut record, &mut walk)?;

        if record.name.is_empty() {
            tracing::debug!("Object {} has no name, skipping", id);
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Follow parent hops until the root, a negative id, or an object with no
    /// parent.
    fn follow_parent_chain(
        &self,
        first_hop: Option<i64>,
        record: &mut ObjectProperties,
        walk: &mut Walk,
    ) -> Result<()> {
        let mut visited = HashSet::from([walk.object_id]);
        let mut hop = first_hop;

        while let Some(parent) = hop {
            let Ok(parent) = usize::try_from(parent) else {
                break;
            };
            if parent == self.resolver.root_id {
                break;
            }
            if !visited.insert(parent) {
                return Err(Error::ParentCycle {
                    object_id: walk.object_id,
                    repeated: parent,
                });
            }
            hop = self.read_object(parent, record, walk)?;
        }

        Ok(())
    }

    /// Read the object an `instanceof` link points at into the same record.
    ///
    /// The target's own parent hop is dropped.
    fn merge_instance_of(
        &self,
        target: i64,
        record: &mut ObjectProperties,
        walk: &mut Walk,
    ) -> Result<()> {
        let Ok(target) = usize::try_from(target) else {
            tracing::warn!(
                "Object {} has an instance-of link to invalid id {}",
                walk.object_id,
                target
            );
            return Ok(());
        };

        if walk.reading.contains(&target) {
            return Err(Error::InstanceOfCycle {
                object_id: walk.object_id,
                repeated: target,
            });
        }

        self.read_object(target, record, walk).map(|_| ())
    }

    /// Apply one object's pairs to `record` and return its parent hop.
    fn read_object(
        &self,
        id: usize,
        record: &mut ObjectProperties,
        walk: &mut Walk,
    ) -> Result<Option<i64>> {
        let Some(range) = self.offsets.entry_range(id, self.pairs.len())? else {
            tracing::warn!(
                "Object {} links to object {} which has no offset entry",
                walk.object_id,
                id
            );
            return Ok(None);
        };

        if range.is_empty() {
            return Ok(None);
        }
        if range.end > self.pairs.len() || range.len() % 2 != 0 {
            return Err(Error::PairRangeOutOfBounds {
                object_id: id,
                start: range.start,
                end: range.end,
                len: self.pairs.len(),
            });
        }

        walk.reading.push(id);
        let mut hop = None;

        for (attr_ref, value_index) in self.pairs.pairs(range) {
            let attr = self.attrs.attribute_at(attr_ref)?;

            match Marker::of(attr) {
                Marker::Parent => {
                    let parent = object_ref(self.values.get(value_index)?, attr, walk)?;
                    record.parents.push(parent);
                    hop = Some(parent);
                }
                Marker::InstanceOf => {
                    let target = object_ref(self.values.get(value_index)?, attr, walk)?;
                    self.merge_instance_of(target, record, walk)?;
                }
                Marker::Structural => {}
                Marker::Name => {
                    let value = self.values.get(value_index)?;
                    let name = value.as_str().ok_or_else(|| Error::UnexpectedValueType {
                        object_id: walk.object_id,
                        key: attr.key(),
                        expected: "string",
                        found: value.kind(),
                    })?;
                    record.set_name_if_unset(name);
                }
                Marker::Property => {
                    let value = self.values.get(value_index)?;
                    record.insert_property(
                        &attr.category,
                        &attr.name,
                        value.format_with_unit(attr.unit.as_deref()),
                    );
                }
            }
        }

        walk.reading.pop();
        Ok(hop)
    }
}

fn object_ref(value: &PropValue, attr: &AttributeDescriptor, walk: &Walk) -> Result<i64> {
    value.as_object_id().ok_or_else(|| Error::UnexpectedValueType {
        object_id: walk.object_id,
        key: attr.key(),
        expected: "object id",
        found: value.kind(),
    })
}
