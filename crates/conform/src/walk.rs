//! Depth-first traversal shared by the compiler (over schemas) and the
//! strict wrapper (over actual values).

use core::convert::Infallible;

use crate::{Path, PathError, Schema, Value};

/// How a node presents itself to the walker.
pub(crate) enum Branch<'a, T> {
    Map(Vec<(&'a str, &'a T)>),
    Slice(&'a [T]),
    Leaf,
}

pub(crate) trait Tree: Sized {
    fn branch(&self) -> Branch<'_, Self>;

    /// Scalars, predicates, opaque literals and empty collections.
    fn is_leaf(&self) -> bool {
        match self.branch() {
            Branch::Map(entries) => entries.is_empty(),
            Branch::Slice(items) => items.is_empty(),
            Branch::Leaf => true,
        }
    }
}

impl Tree for Schema {
    fn branch(&self) -> Branch<'_, Self> {
        match self {
            Schema::Map(map) => Branch::Map(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            Schema::Slice(items) => Branch::Slice(items),
            Schema::Literal(_) | Schema::Is(_) => Branch::Leaf,
        }
    }
}

impl Tree for Value {
    fn branch(&self) -> Branch<'_, Self> {
        match self {
            Value::Map(map) => Branch::Map(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            Value::Array(items) => Branch::Slice(&items.0),
            _ => Branch::Leaf,
        }
    }
}

pub(crate) struct WalkInfo<'a, T> {
    pub path: Path,
    pub node: &'a T,
}

/// Visit every node below `root`, parents before children.
///
/// A map or slice root is not itself visited; a leaf root is visited once
/// at the empty path. With `expand_paths`, keys of a root map are parsed as
/// paths (`"a.b"` addresses `b` inside `a`); deeper keys are always taken
/// literally. The first error, from expansion or from `observer`, aborts the
/// walk.
pub(crate) fn walk<'a, T, E, F>(root: &'a T, expand_paths: bool, observer: &mut F) -> Result<(), E>
where
    T: Tree,
    E: From<PathError>,
    F: FnMut(WalkInfo<'a, T>) -> Result<(), E>,
{
    walk_with(
        root,
        &mut |key: &str| -> Result<Path, E> {
            if expand_paths {
                Ok(expand_key(key)?)
            } else {
                Ok(Path::root().extend_key(key))
            }
        },
        observer,
    )
}

/// [`walk`] without path expansion, which cannot fail.
pub(crate) fn visit<'a, T, F>(root: &'a T, observer: &mut F)
where
    T: Tree,
    F: FnMut(WalkInfo<'a, T>),
{
    let walked = walk_with(
        root,
        &mut |key: &str| -> Result<Path, Infallible> { Ok(Path::root().extend_key(key)) },
        &mut |info: WalkInfo<'a, T>| -> Result<(), Infallible> {
            observer(info);
            Ok(())
        },
    );
    match walked {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

fn walk_with<'a, T, E, K, F>(root: &'a T, root_key: &mut K, observer: &mut F) -> Result<(), E>
where
    T: Tree,
    K: FnMut(&str) -> Result<Path, E>,
    F: FnMut(WalkInfo<'a, T>) -> Result<(), E>,
{
    match root.branch() {
        Branch::Map(entries) => {
            for (key, child) in entries {
                walk_node(child, root_key(key)?, observer)?;
            }
            Ok(())
        }
        Branch::Slice(items) => {
            for (index, child) in items.iter().enumerate() {
                walk_node(child, Path::root().extend_index(index), observer)?;
            }
            Ok(())
        }
        Branch::Leaf => observer(WalkInfo {
            path: Path::root(),
            node: root,
        }),
    }
}

fn walk_node<'a, T, E, F>(node: &'a T, path: Path, observer: &mut F) -> Result<(), E>
where
    T: Tree,
    F: FnMut(WalkInfo<'a, T>) -> Result<(), E>,
{
    observer(WalkInfo {
        path: path.clone(),
        node,
    })?;
    match node.branch() {
        Branch::Map(entries) => {
            for (key, child) in entries {
                walk_node(child, path.extend_key(key), observer)?;
            }
        }
        Branch::Slice(items) => {
            for (index, child) in items.iter().enumerate() {
                walk_node(child, path.extend_index(index), observer)?;
            }
        }
        Branch::Leaf => {}
    }
    Ok(())
}

/// A root key must address something below the root.
fn expand_key(key: &str) -> Result<Path, PathError> {
    let path = Path::parse(key)?;
    if path.is_root() {
        return Err(PathError::InvalidPath(key.to_string()));
    }
    Ok(path)
}
