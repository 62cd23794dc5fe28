// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::api;
use crate::error::InvalidSampleError;

/// One key/value annotation on a sample.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Label {
    key: Box<str>,
    value: Box<str>,
}

impl Label {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A canonical label mapping: sorted by key, keys unique. Two samples
/// carrying the same labels in any order land in the same bucket.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct LabelSet {
    labels: Box<[Label]>,
}

impl LabelSet {
    pub fn from_api(labels: &[api::Label<'_>]) -> Result<Self, InvalidSampleError> {
        let mut owned: Vec<Label> = labels
            .iter()
            .map(|label| Label::new(label.key, label.value))
            .collect();
        owned.sort_unstable();
        for window in owned.windows(2) {
            if window[0].key == window[1].key {
                return Err(InvalidSampleError::DuplicateLabelKey(window[0].key.clone()));
            }
        }
        Ok(Self {
            labels: owned.into_boxed_slice(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_matter() {
        let a = LabelSet::from_api(&[
            api::Label {
                key: "thread",
                value: "main",
            },
            api::Label {
                key: "span id",
                value: "42",
            },
        ])
        .unwrap();
        let b = LabelSet::from_api(&[
            api::Label {
                key: "span id",
                value: "42",
            },
            api::Label {
                key: "thread",
                value: "main",
            },
        ])
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = LabelSet::from_api(&[
            api::Label {
                key: "thread",
                value: "main",
            },
            api::Label {
                key: "thread",
                value: "worker",
            },
        ])
        .unwrap_err();
        assert_eq!(InvalidSampleError::DuplicateLabelKey("thread".into()), err);
    }

    #[test]
    fn empty_labels_are_the_common_case() {
        let labels = LabelSet::from_api(&[]).unwrap();
        assert!(labels.is_empty());
    }
}
