// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::DataObjectError;
use crate::traits::DataObjectRef;

/// A named collection of data objects that store source nodes read from.
pub trait Store: Send + Sync {
    fn get_object(
        &self,
        name: &str,
        params: &BTreeMap<String, Value>,
    ) -> Result<DataObjectRef, DataObjectError>;

    fn name(&self) -> &'static str;
}
