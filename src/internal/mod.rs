// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod aggregator;
mod function;
mod interner;
mod label;
mod location;
mod profile;
mod registry;
mod stack_trace;
mod value_type;

pub use aggregator::*;
pub use function::*;
pub use interner::*;
pub use label::*;
pub use location::*;
pub use profile::*;
pub use registry::*;
pub use stack_trace::*;
pub use value_type::*;

use crate::collections::identifiable::*;
use crate::pprof;
