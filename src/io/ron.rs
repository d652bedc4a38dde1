//! RON I/O
use crate::{
    error::Result,
    traits::{ConvertToSerializable, RONExport, RONImport},
};

impl<S: ConvertToSerializable> RONExport for S {
    fn to_ron_string(&self) -> Result<String> {
        Ok(ron::to_string(&self.to_serializable())?)
    }
}

impl<S: ConvertToSerializable> RONImport for S
where
    for<'a> S::SerializableType: serde::Deserialize<'a>,
{
    fn from_ron_string(s: &str) -> Result<Self> {
        Self::from_serializable(ron::from_str(s)?)
    }
}
