use crate::category::Category;
use serde_json::{Map, Value};

/// Where a category node may live inside an upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Demographics,
    Root,
    Predictions,
    Result,
    Data,
}

impl Container {
    /// Probe order.
    pub const ORDER: [Container; 5] = [
        Container::Demographics,
        Container::Root,
        Container::Predictions,
        Container::Result,
        Container::Data,
    ];

    fn resolve<'a>(&self, payload: &'a Map<String, Value>) -> Option<&'a Map<String, Value>> {
        let key = match self {
            Self::Root => return Some(payload),
            Self::Demographics => "demographics",
            Self::Predictions => "predictions",
            Self::Result => "result",
            Self::Data => "data",
        };
        payload.get(key).and_then(Value::as_object)
    }
}

/// A category node together with where it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub container: Container,
    pub key: &'static str,
    pub node: &'a Value,
}

/// Finds the node holding `category`'s predictions, trying each container
/// with the category key and then its alias. JSON `null` counts as absent.
pub fn locate(payload: &Map<String, Value>, category: Category) -> Option<&Value> {
    locate_with_origin(payload, category).map(|found| found.node)
}

pub fn locate_with_origin(payload: &Map<String, Value>, category: Category) -> Option<Located<'_>> {
    for container in Container::ORDER {
        let Some(scope) = container.resolve(payload) else {
            continue;
        };
        for key in [category.key(), category.alias()] {
            match scope.get(key) {
                Some(Value::Null) | None => continue,
                Some(node) => {
                    return Some(Located {
                        container,
                        key,
                        node,
                    })
                }
            }
        }
    }
    None
}
