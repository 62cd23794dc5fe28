// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Hand-written prost messages for the subset of the pprof wire format the
//! recorder emits. Mappings are never written because frames arrive already
//! resolved, without module information; absent fields encode as their
//! protobuf defaults.

#[derive(Eq, Hash, PartialEq, ::prost::Message)]
pub struct Profile {
    #[prost(message, repeated, tag = "1")]
    pub sample_types: Vec<ValueType>,
    #[prost(message, repeated, tag = "2")]
    pub samples: Vec<Sample>,
    #[prost(message, repeated, tag = "4")]
    pub locations: Vec<Location>,
    #[prost(message, repeated, tag = "5")]
    pub functions: Vec<Function>,
    #[prost(string, repeated, tag = "6")]
    pub string_table: Vec<String>,
    #[prost(int64, tag = "9")]
    pub time_nanos: i64,
    #[prost(int64, tag = "10")]
    pub duration_nanos: i64,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, ::prost::Message)]
pub struct ValueType {
    #[prost(int64, tag = "1")]
    pub r#type: i64, // Index into string table
    #[prost(int64, tag = "2")]
    pub unit: i64, // Index into string table
}

#[derive(Clone, Eq, Hash, PartialEq, PartialOrd, Ord, ::prost::Message)]
pub struct Sample {
    /// The ids recorded here correspond to a Profile.location.id.
    /// The leaf is at location_id\[0\].
    #[prost(uint64, repeated, tag = "1")]
    pub location_ids: Vec<u64>,
    /// The type and unit of each value is defined by the corresponding
    /// entry in Profile.sample_type. All samples must have the same
    /// number of values, the same as the length of Profile.sample_type.
    #[prost(int64, repeated, tag = "2")]
    pub values: Vec<i64>,
    /// label includes additional context for this sample. It can include
    /// things like a thread id, allocation size, etc.
    #[prost(message, repeated, tag = "3")]
    pub labels: Vec<Label>,
}

#[derive(Clone, Eq, Hash, PartialEq, PartialOrd, Ord, ::prost::Message)]
pub struct Label {
    #[prost(int64, tag = "1")]
    pub key: i64, // Index into string table
    #[prost(int64, tag = "2")]
    pub str: i64, // Index into string table
    #[prost(int64, tag = "3")]
    pub num: i64,
    #[prost(int64, tag = "4")]
    pub num_unit: i64, // Index into string table
}

impl Label {
    pub fn str(key: i64, str: i64) -> Self {
        Self {
            key,
            str,
            num: 0,
            num_unit: 0,
        }
    }
}

#[derive(Clone, Eq, Hash, PartialEq, PartialOrd, Ord, ::prost::Message)]
pub struct Location {
    // Unique nonzero id for the location.
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(uint64, tag = "3")]
    pub address: u64,
    #[prost(message, repeated, tag = "4")]
    pub lines: Vec<Line>,
}

#[derive(Copy, Clone, Eq, Hash, PartialEq, PartialOrd, Ord, ::prost::Message)]
pub struct Line {
    /// The id of the corresponding profile.Function for this line.
    #[prost(uint64, tag = "1")]
    pub function_id: u64,
    /// Line number in source code.
    #[prost(int64, tag = "2")]
    pub line: i64,
}

#[derive(Copy, Clone, Eq, Hash, PartialEq, PartialOrd, Ord, ::prost::Message)]
pub struct Function {
    // Unique nonzero id for the function.
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(int64, tag = "2")]
    pub name: i64, // Index into string table
    #[prost(int64, tag = "3")]
    pub system_name: i64, // Index into string table
    #[prost(int64, tag = "4")]
    pub filename: i64, // Index into string table
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn basic() {
        let mut strings: Vec<String> = Vec::with_capacity(8);
        strings.push("".into()); // 0
        strings.push("samples".into()); // 1
        strings.push("count".into()); // 2
        strings.push("{main}".into()); // 3
        strings.push("index.php".into()); // 4
        strings.push("test".into()); // 5

        let main_function = Function {
            id: 1,
            name: 3,
            system_name: 3,
            filename: 4,
        };

        let test_function = Function {
            id: 2,
            name: 5,
            system_name: 5,
            filename: 4,
        };

        let main_location = Location {
            id: 1,
            address: 0,
            lines: vec![Line {
                function_id: main_function.id,
                line: 0,
            }],
        };

        let test_location = Location {
            id: 2,
            address: 0,
            lines: vec![Line {
                function_id: test_function.id,
                line: 4,
            }],
        };

        let profile = Profile {
            sample_types: vec![ValueType { r#type: 1, unit: 2 }],
            samples: vec![
                Sample {
                    location_ids: vec![main_location.id],
                    values: vec![1],
                    labels: vec![],
                },
                Sample {
                    location_ids: vec![test_location.id, main_location.id],
                    values: vec![1],
                    labels: vec![],
                },
            ],
            locations: vec![main_location, test_location],
            functions: vec![main_function, test_function],
            string_table: strings,
            ..Default::default()
        };

        let mut buffer: Vec<u8> = Vec::new();
        profile.encode(&mut buffer).expect("encoding to succeed");
        assert!(buffer.len() >= 64);

        let decoded = Profile::decode(buffer.as_slice()).expect("decoding to succeed");
        assert_eq!(profile, decoded);
    }
}
