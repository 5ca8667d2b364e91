use ahash::AHashSet;
use tracing::debug;

use crate::results::ValueResult;
use crate::walk::{Tree, WalkInfo, visit};
use crate::{Path, Validator, Value};

/// Wrap `validator` so that leaves of the actual value no check looked at
/// are reported as strict failures.
///
/// A leaf counts as looked at when a result was recorded at its path or
/// below it, or when an equality result at one of its ancestors compared
/// the enclosing value as a whole. Predicates that only inspect a path
/// itself, such as presence checks, do not vouch for what lies below it.
/// Scalar inputs have no fields and are passed through unchanged.
pub fn strict(validator: Validator) -> Validator {
    Validator::new(move |actual| {
        let mut results = validator.validate(actual);
        if !matches!(actual, Value::Map(_) | Value::Array(_)) {
            return results;
        }

        let checked: AHashSet<Path> = results.iter().map(|result| result.path.clone()).collect();
        let above_checked: AHashSet<Path> = checked.iter().flat_map(|path| path.ancestors()).collect();
        let compared_whole: AHashSet<Path> = results
            .iter()
            .filter(|result| result.covers_subtree())
            .map(|result| result.path.clone())
            .collect();

        let mut unexpected = Vec::new();
        visit(actual, &mut |info: WalkInfo<'_, Value>| {
            if !info.node.is_leaf() {
                return;
            }
            let covered = checked.contains(&info.path)
                || above_checked.contains(&info.path)
                || info
                    .path
                    .ancestors()
                    .any(|ancestor| compared_whole.contains(&ancestor));
            if !covered {
                unexpected.push(info.path);
            }
        });

        if !unexpected.is_empty() {
            debug!(count = unexpected.len(), "strict validation found unexpected fields");
        }
        for path in unexpected {
            results.record(ValueResult::strict_failure(path));
        }
        results
    })
}
