//! Stable handles into the model arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Model;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Rebuild a handle from its raw value, e.g. after a round trip
            /// through a template context. Use the model's `get_*` accessors
            /// to resolve handles that did not come from the model directly.
            pub fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw value of the handle.
            pub fn raw(self) -> u32 {
                self.0
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

handle!(
    /// Handle of a [`Service`](crate::Service).
    ServiceId
);
handle!(
    /// Handle of a [`Version`](crate::Version).
    VersionId
);
handle!(
    /// Handle of a [`Type`](crate::Type).
    TypeId
);
handle!(
    /// Handle of an [`Attribute`](crate::Attribute).
    AttributeId
);
handle!(
    /// Handle of an [`EnumValue`](crate::EnumValue).
    EnumValueId
);
handle!(
    /// Handle of a [`Resource`](crate::Resource).
    ResourceId
);
handle!(
    /// Handle of a [`Method`](crate::Method).
    MethodId
);
handle!(
    /// Handle of a [`Parameter`](crate::Parameter).
    ParameterId
);
handle!(
    /// Handle of a [`Locator`](crate::Locator).
    LocatorId
);

/// Implemented by the handles of entities that have an owner.
///
/// The owner of an entity is recorded when it is added to its parent and
/// never changes afterwards.
pub trait Child: Copy {
    /// Handle type of the owning entity.
    type Owner: Copy;

    /// Look up the owner of this entity in `model`.
    fn owner_in(self, model: &Model) -> Self::Owner;
}
