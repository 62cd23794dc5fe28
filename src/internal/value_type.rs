// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::api;
use crate::error::ConfigurationError;
use std::str::FromStr;

/// How a dimension folds repeated observations for the same bucket. Both
/// kinds accumulate by addition of the reported value; the kind records
/// whether the dimension is an occurrence count or a running total, which
/// shows up in the exported unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Count,
    Sum,
}

/// An owned measurement dimension: name, unit, and accumulation kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ValueType {
    pub name: Box<str>,
    pub unit: Box<str>,
    pub kind: ValueKind,
}

impl From<SampleType> for ValueType {
    fn from(sample_type: SampleType) -> Self {
        Self {
            name: sample_type.name().into(),
            unit: sample_type.unit().into(),
            kind: sample_type.kind(),
        }
    }
}

/// Measurement dimensions the recorder knows how to track. Names and units
/// follow the profiler's value-type table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SampleType {
    CpuTime,
    CpuSamples,
    WallTime,
    AllocSamples,
    AllocSpace,
    HeapSpace,
}

impl SampleType {
    pub const ALL: [SampleType; 6] = [
        SampleType::CpuTime,
        SampleType::CpuSamples,
        SampleType::WallTime,
        SampleType::AllocSamples,
        SampleType::AllocSpace,
        SampleType::HeapSpace,
    ];

    /// The dimensions enabled when no configuration says otherwise.
    pub const DEFAULT_ENABLED: [SampleType; 3] = [
        SampleType::CpuTime,
        SampleType::CpuSamples,
        SampleType::WallTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SampleType::CpuTime => "cpu-time",
            SampleType::CpuSamples => "cpu-samples",
            SampleType::WallTime => "wall-time",
            SampleType::AllocSamples => "alloc-samples",
            SampleType::AllocSpace => "alloc-space",
            SampleType::HeapSpace => "heap-space",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SampleType::CpuTime | SampleType::WallTime => "nanoseconds",
            SampleType::CpuSamples | SampleType::AllocSamples => "count",
            SampleType::AllocSpace | SampleType::HeapSpace => "bytes",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            SampleType::CpuSamples | SampleType::AllocSamples => ValueKind::Count,
            _ => ValueKind::Sum,
        }
    }
}

impl FromStr for SampleType {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "cpu-time" => SampleType::CpuTime,
            "cpu-samples" => SampleType::CpuSamples,
            "wall-time" => SampleType::WallTime,
            "alloc-samples" => SampleType::AllocSamples,
            "alloc-space" => SampleType::AllocSpace,
            "heap-space" => SampleType::HeapSpace,
            _ => return Err(ConfigurationError::UnknownSampleType(name.into())),
        })
    }
}

impl<'a> TryFrom<api::ValueType<'a>> for SampleType {
    type Error = ConfigurationError;

    fn try_from(vt: api::ValueType<'a>) -> Result<Self, Self::Error> {
        let sample_type = vt.r#type.parse::<SampleType>()?;
        if sample_type.unit() != vt.unit {
            let pair = format!("{}/{}", vt.r#type, vt.unit);
            return Err(ConfigurationError::UnknownSampleType(pair.into()));
        }
        Ok(sample_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_type_round_trip_conversion() {
        for original in SampleType::ALL {
            let round_trip: SampleType = original.name().parse().expect("known name to parse");
            assert_eq!(original, round_trip);
        }
    }

    #[test]
    fn unknown_name_fails_to_parse() {
        let result = "lock-time".parse::<SampleType>();
        assert_eq!(
            Err(ConfigurationError::UnknownSampleType("lock-time".into())),
            result
        );
    }

    #[test]
    fn mismatched_unit_is_rejected() {
        let result = SampleType::try_from(api::ValueType::new("cpu-time", "count"));
        assert!(result.is_err());
    }

    #[test]
    fn kinds_follow_units() {
        for sample_type in SampleType::ALL {
            let expected = if sample_type.unit() == "count" {
                ValueKind::Count
            } else {
                ValueKind::Sum
            };
            assert_eq!(expected, sample_type.kind());
        }
    }
}
