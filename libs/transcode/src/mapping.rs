use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::kind::Kind;
use crate::schema::Schema;

/// One matched field: positions on both sides plus the destination's
/// declared kind, which is the rule lookup target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLink {
    /// Shared name, for logs.
    pub name: &'static str,
    /// Position in the destination schema.
    pub target: usize,
    /// Position in the source schema.
    pub source: usize,
    pub target_kind: Kind,
}

/// Precomputed destination → source field matching for one schema pair.
///
/// Built once per (destination, source) pair, then reused for every call.
/// `links` keep destination declared order.
#[derive(Debug)]
pub struct FieldMap {
    target: &'static str,
    source: &'static str,
    links: Vec<FieldLink>,
    /// Destination fields with no same-named source field.
    unmatched: Vec<&'static str>,
}

impl FieldMap {
    pub fn build(target: &'static Schema, source: &'static Schema) -> Self {
        let mut links = Vec::with_capacity(target.len());
        let mut unmatched = Vec::new();

        for (index, field) in target.fields().iter().enumerate() {
            match source.position(field.name) {
                Some(source_index) => links.push(FieldLink {
                    name: field.name,
                    target: index,
                    source: source_index,
                    target_kind: field.kind,
                }),
                None => unmatched.push(field.name),
            }
        }

        tracing::debug!(
            target_schema = target.name(),
            source_schema = source.name(),
            matched = links.len(),
            unmatched = ?unmatched,
            "field map built"
        );

        Self {
            target: target.name(),
            source: source.name(),
            links,
            unmatched,
        }
    }

    pub fn links(&self) -> &[FieldLink] {
        &self.links
    }

    pub fn unmatched(&self) -> &[&'static str] {
        &self.unmatched
    }

    pub fn target_name(&self) -> &'static str {
        self.target
    }

    pub fn source_name(&self) -> &'static str {
        self.source
    }
}

/// Identity of a `'static` schema instance.
type SchemaKey = usize;

fn schema_key(schema: &'static Schema) -> SchemaKey {
    std::ptr::from_ref(schema) as usize
}

/// Cache of [`FieldMap`]s keyed by (destination schema, source schema).
///
/// Read-mostly: hits take the read lock only. A miss builds the map outside
/// the lock; two racing builders produce identical maps and the first insert
/// wins.
#[derive(Debug, Default)]
pub struct FieldMapCache {
    maps: RwLock<HashMap<(SchemaKey, SchemaKey), Arc<FieldMap>>>,
}

impl FieldMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, target: &'static Schema, source: &'static Schema) -> Arc<FieldMap> {
        let key = (schema_key(target), schema_key(source));

        {
            let guard = match self.maps.read() {
                Ok(g) => g,
                Err(poisoned) => {
                    tracing::warn!("field map cache read lock was poisoned, recovering");
                    poisoned.into_inner()
                }
            };
            if let Some(map) = guard.get(&key) {
                return Arc::clone(map);
            }
        }

        let built = Arc::new(FieldMap::build(target, source));

        let mut guard = match self.maps.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("field map cache write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        Arc::clone(guard.entry(key).or_insert(built))
    }

    pub fn len(&self) -> usize {
        match self.maps.read() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::kind::ScalarKind;
    use crate::schema::FieldDescriptor;
    use crate::wrappers::{Int64Value, StringValue};

    fn domain() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new(
                "Domain",
                vec![
                    FieldDescriptor::of::<String>("id"),
                    FieldDescriptor::of::<String>("name"),
                    FieldDescriptor::of::<i64>("order"),
                    FieldDescriptor::of::<bool>("archived"),
                ],
            )
        })
    }

    fn wire() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new(
                "Wire",
                vec![
                    FieldDescriptor::of::<Option<Int64Value>>("order"),
                    FieldDescriptor::of::<Option<StringValue>>("id"),
                    FieldDescriptor::of::<String>("name"),
                ],
            )
        })
    }

    #[test]
    fn test_links_follow_destination_order() {
        let map = FieldMap::build(domain(), wire());
        let names: Vec<&str> = map.links().iter().map(|l| l.name).collect();
        assert_eq!(names, ["id", "name", "order"]);
        assert_eq!(map.links()[0].source, 1);
        assert_eq!(map.links()[2].source, 0);
        assert_eq!(map.links()[2].target_kind, Kind::Native(ScalarKind::Int64));
        assert_eq!(map.unmatched(), ["archived"]);
    }

    #[test]
    fn test_cache_reuses_map_per_pair() {
        let cache = FieldMapCache::new();
        let first = cache.get_or_build(domain(), wire());
        let second = cache.get_or_build(domain(), wire());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let reverse = cache.get_or_build(wire(), domain());
        assert!(!Arc::ptr_eq(&first, &reverse));
        assert_eq!(reverse.target_name(), "Wire");
        assert_eq!(reverse.source_name(), "Domain");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_racing_builders_share_first_insert() {
        let cache = FieldMapCache::new();
        let maps: Vec<Arc<FieldMap>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_build(domain(), wire())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(cache.len(), 1);
        let cached = cache.get_or_build(domain(), wire());
        assert!(maps.iter().all(|m| Arc::ptr_eq(m, &cached)));
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let cache = FieldMapCache::new();
        std::thread::scope(|s| {
            let result = s
                .spawn(|| {
                    let _guard = cache.maps.write().unwrap();
                    panic!("writer died holding the lock");
                })
                .join();
            assert!(result.is_err());
        });
        assert!(cache.maps.is_poisoned());

        // Miss goes through both the read and the write lock.
        let map = cache.get_or_build(domain(), wire());
        assert_eq!(map.links().len(), 3);
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&map, &cache.get_or_build(domain(), wire())));
    }
}
