//! `Bindable` for standard library and serde_json types

use super::{BindError, Bindable, Shape, UnsupportedKey};
use crate::document::IdObject;
use serde_json::value::RawValue;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Key type of a map that can appear in a model
pub trait MapKey: Sized {
    /// Whether keys of this type can address JSON object keys
    const ADDRESSABLE: bool;

    fn to_key_string(&self) -> String;

    /// Parse the `id` of a resource identifier into a key
    fn from_link_id(id: &str) -> Result<Self, BindError>;
}

impl MapKey for String {
    const ADDRESSABLE: bool = true;

    fn to_key_string(&self) -> String {
        self.clone()
    }

    fn from_link_id(id: &str) -> Result<Self, BindError> {
        Ok(id.to_string())
    }
}

macro_rules! integer_map_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                const ADDRESSABLE: bool = false;

                fn to_key_string(&self) -> String {
                    self.to_string()
                }

                fn from_link_id(id: &str) -> Result<Self, BindError> {
                    id.parse().map_err(|_| BindError::InvalidId(id.to_string()))
                }
            }
        )*
    };
}

integer_map_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! scalar_bindable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn is_absent(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn shape(&mut self) -> Shape<'_> {
                    Shape::Scalar
                }
            }
        )*
    };
}

scalar_bindable!(
    bool, char, (), String, &'static str,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: Bindable> Bindable for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Optional(self.as_mut().map(|value| value as &mut dyn Bindable))
    }

    fn bind_one(&mut self, target: &IdObject) -> Result<(), BindError> {
        let value = T::from_id_object(target).ok_or(BindError::UnsupportedOne)?;
        *self = Some(value);
        Ok(())
    }

    fn bind_many(&mut self, targets: &[IdObject]) -> Result<(), BindError> {
        match self {
            Some(value) => value.bind_many(targets),
            None => Err(BindError::NotAllocated),
        }
    }

    fn from_id_object(target: &IdObject) -> Option<Self> {
        T::from_id_object(target).map(Some)
    }

    fn unsupported_key(&self) -> Option<UnsupportedKey> {
        T::unsupported_key_of()
    }

    fn unsupported_key_of() -> Option<UnsupportedKey> {
        T::unsupported_key_of()
    }
}

impl<T: Bindable> Bindable for Box<T> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn shape(&mut self) -> Shape<'_> {
        (**self).shape()
    }

    fn bind_one(&mut self, target: &IdObject) -> Result<(), BindError> {
        (**self).bind_one(target)
    }

    fn bind_many(&mut self, targets: &[IdObject]) -> Result<(), BindError> {
        (**self).bind_many(targets)
    }

    fn from_id_object(target: &IdObject) -> Option<Self> {
        T::from_id_object(target).map(Box::new)
    }

    fn unsupported_key(&self) -> Option<UnsupportedKey> {
        T::unsupported_key_of()
    }

    fn unsupported_key_of() -> Option<UnsupportedKey> {
        T::unsupported_key_of()
    }
}

impl<T: Bindable> Bindable for Vec<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::List(self.iter_mut().map(|value| value as &mut dyn Bindable).collect())
    }
}

impl<T: Bindable> Bindable for VecDeque<T> {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::List(self.iter_mut().map(|value| value as &mut dyn Bindable).collect())
    }
}

impl<T: Bindable, const N: usize> Bindable for [T; N] {
    fn is_absent(&self) -> bool {
        self.iter().all(Bindable::is_absent)
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::List(self.iter_mut().map(|value| value as &mut dyn Bindable).collect())
    }
}

fn map_entries<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a mut V)>,
    type_name: &'static str,
) -> Result<Vec<(String, &'a mut dyn Bindable)>, UnsupportedKey>
where
    K: MapKey + 'a,
    V: Bindable + 'a,
{
    if !K::ADDRESSABLE {
        return Err(UnsupportedKey(type_name));
    }
    let mut entries: Vec<(String, &'a mut dyn Bindable)> = entries
        .map(|(key, value)| (key.to_key_string(), value as &mut dyn Bindable))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn key_support<K: MapKey>(type_name: &'static str) -> Option<UnsupportedKey> {
    (!K::ADDRESSABLE).then_some(UnsupportedKey(type_name))
}

fn bind_entries<K, V>(
    targets: &[IdObject],
    mut insert: impl FnMut(K, V),
) -> Result<(), BindError>
where
    K: MapKey,
    V: Bindable,
{
    for target in targets {
        let value = V::from_id_object(target).ok_or(BindError::UnsupportedValue)?;
        insert(K::from_link_id(&target.id)?, value);
    }
    Ok(())
}

impl<K, V, S> Bindable for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Bindable,
    S: BuildHasher,
{
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(map_entries(self.iter_mut(), std::any::type_name::<Self>()))
    }

    fn bind_many(&mut self, targets: &[IdObject]) -> Result<(), BindError> {
        bind_entries::<K, V>(targets, |key, value| {
            self.insert(key, value);
        })
    }

    fn unsupported_key(&self) -> Option<UnsupportedKey> {
        Self::unsupported_key_of()
    }

    fn unsupported_key_of() -> Option<UnsupportedKey> {
        key_support::<K>(std::any::type_name::<Self>())
    }
}

impl<K, V> Bindable for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Bindable,
{
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Map(map_entries(self.iter_mut(), std::any::type_name::<Self>()))
    }

    fn bind_many(&mut self, targets: &[IdObject]) -> Result<(), BindError> {
        bind_entries::<K, V>(targets, |key, value| {
            self.insert(key, value);
        })
    }

    fn unsupported_key(&self) -> Option<UnsupportedKey> {
        Self::unsupported_key_of()
    }

    fn unsupported_key_of() -> Option<UnsupportedKey> {
        key_support::<K>(std::any::type_name::<Self>())
    }
}

impl Bindable for Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn shape(&mut self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Optional(None),
            Value::Array(items) => {
                Shape::List(items.iter_mut().map(|value| value as &mut dyn Bindable).collect())
            }
            Value::Object(map) => {
                let mut entries: Vec<(String, &mut dyn Bindable)> = map
                    .iter_mut()
                    .map(|(key, value)| (key.clone(), value as &mut dyn Bindable))
                    .collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                Shape::Map(Ok(entries))
            }
            _ => Shape::Scalar,
        }
    }
}

// Opaque raw JSON is a leaf, never descended into.
impl Bindable for Box<RawValue> {
    fn is_absent(&self) -> bool {
        self.get().trim() == "null"
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Scalar
    }
}

impl Bindable for IdObject {
    fn is_absent(&self) -> bool {
        self.resource_type.is_empty() && self.id.is_empty()
    }

    fn shape(&mut self) -> Shape<'_> {
        Shape::Scalar
    }

    fn from_id_object(target: &IdObject) -> Option<Self> {
        Some(target.clone())
    }
}
