// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{SampleType, ValueType};
use crate::api;
use crate::error::ConfigurationError;

/// The fixed, ordered set of dimensions tracked per sample.
///
/// Built once at startup and then read-only; there is no mutation API, so
/// the positional alignment between a sample's values slice and the active
/// dimensions can never shift underneath the aggregator.
#[derive(Clone, Debug)]
pub struct ValueTypeRegistry {
    value_types: Box<[ValueType]>,
    sample_types: Box<[SampleType]>,
}

impl ValueTypeRegistry {
    pub fn from_sample_types(sample_types: &[SampleType]) -> Result<Self, ConfigurationError> {
        Self::build(sample_types.to_vec())
    }

    /// Builds a registry from configured dimension names. Unknown names fail
    /// here, at startup, not at sample time.
    pub fn try_from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigurationError> {
        let mut sample_types = Vec::with_capacity(names.len());
        for name in names {
            sample_types.push(name.as_ref().parse::<SampleType>()?);
        }
        Self::build(sample_types)
    }

    /// Builds a registry from (name, unit) pairs, validating both halves.
    pub fn try_new(value_types: &[api::ValueType<'_>]) -> Result<Self, ConfigurationError> {
        let mut sample_types = Vec::with_capacity(value_types.len());
        for vt in value_types {
            sample_types.push(SampleType::try_from(*vt)?);
        }
        Self::build(sample_types)
    }

    fn build(sample_types: Vec<SampleType>) -> Result<Self, ConfigurationError> {
        if sample_types.is_empty() {
            return Err(ConfigurationError::EmptySampleTypes);
        }
        for (offset, sample_type) in sample_types.iter().enumerate() {
            if sample_types[..offset].contains(sample_type) {
                return Err(ConfigurationError::DuplicateSampleType(
                    sample_type.name().into(),
                ));
            }
        }
        let value_types = sample_types.iter().map(|t| ValueType::from(*t)).collect();
        Ok(Self {
            value_types,
            sample_types: sample_types.into_boxed_slice(),
        })
    }

    /// The active dimensions, in the order every values slice must follow.
    pub fn get_active_value_types(&self) -> &[ValueType] {
        &self.value_types
    }

    pub fn sample_types(&self) -> &[SampleType] {
        &self.sample_types
    }

    pub fn len(&self) -> usize {
        self.value_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enabled_set_builds_in_order() {
        let registry = ValueTypeRegistry::from_sample_types(&SampleType::DEFAULT_ENABLED).unwrap();
        let names: Vec<&str> = registry
            .get_active_value_types()
            .iter()
            .map(|vt| &*vt.name)
            .collect();
        assert_eq!(vec!["cpu-time", "cpu-samples", "wall-time"], names);
    }

    #[test]
    fn unknown_name_fails_fast() {
        let err = ValueTypeRegistry::try_from_names(&["cpu-time", "gpu-time"]).unwrap_err();
        assert_eq!(ConfigurationError::UnknownSampleType("gpu-time".into()), err);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = ValueTypeRegistry::try_from_names(&["cpu-time", "cpu-time"]).unwrap_err();
        assert_eq!(
            ConfigurationError::DuplicateSampleType("cpu-time".into()),
            err
        );
    }

    #[test]
    fn empty_set_is_rejected() {
        let names: [&str; 0] = [];
        let err = ValueTypeRegistry::try_from_names(&names).unwrap_err();
        assert_eq!(ConfigurationError::EmptySampleTypes, err);
    }

    #[test]
    fn api_pairs_validate_units() {
        let registry = ValueTypeRegistry::try_new(&[
            api::ValueType::new("alloc-space", "bytes"),
            api::ValueType::new("alloc-samples", "count"),
        ])
        .unwrap();
        assert_eq!(2, registry.len());
        assert!(ValueTypeRegistry::try_new(&[api::ValueType::new("alloc-space", "count")]).is_err());
    }
}
