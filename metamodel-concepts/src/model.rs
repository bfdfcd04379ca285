//! The concept graph arena.

use metamodel_core::Name;

use crate::{
    Attribute, AttributeId, Child, EnumValue, EnumValueId, Locator, LocatorId, Method, MethodId,
    Parameter, ParameterId, Resource, ResourceId, Service, ServiceId, Type, TypeId, Version,
    VersionId,
};

/// An entity together with the handle of its owner.
#[derive(Debug, Clone)]
struct Slot<O, T> {
    owner: O,
    value: T,
}

trait Named {
    fn name(&self) -> &Name;
}

macro_rules! named {
    ($($ty:ty),* $(,)?) => {
        $(impl Named for $ty {
            fn name(&self) -> &Name {
                <$ty>::name(self)
            }
        })*
    };
}

named!(
    Service, Version, Type, Attribute, EnumValue, Resource, Method, Parameter, Locator
);

/// Re-sort `ids` by the names of the entities they point to.
///
/// The sort is stable, so entities with equal names keep insertion order.
fn sort_by_name<H: Copy, T: Named>(ids: &mut [H], index: impl Fn(H) -> usize, arena: &[T]) {
    ids.sort_by(|a, b| arena[index(*a)].name().cmp(arena[index(*b)].name()));
}

fn find_by_name<H: Copy, T: Named>(
    ids: &[H],
    index: impl Fn(H) -> usize,
    arena: &[T],
    name: &Name,
) -> Option<H> {
    ids.iter()
        .copied()
        .find(|id| arena[index(*id)].name().equals(name))
}

impl<O, T: Named> Named for Slot<O, T> {
    fn name(&self) -> &Name {
        self.value.name()
    }
}

/// The whole API model: every entity of every service, stored by handle.
///
/// All `add_*` methods accept either an entity or `None`; adding `None`, or
/// adding to a parent handle that doesn't exist in this model, is a no-op
/// that returns `None`. Accessors that take a handle directly (`service`,
/// `version`, ...) panic when given a handle from another model; the
/// `get_*` variants return `None` instead.
#[derive(Debug, Clone, Default)]
pub struct Model {
    services: Vec<Service>,
    service_order: Vec<ServiceId>,
    versions: Vec<Slot<ServiceId, Version>>,
    types: Vec<Slot<VersionId, Type>>,
    attributes: Vec<Slot<TypeId, Attribute>>,
    values: Vec<Slot<TypeId, EnumValue>>,
    resources: Vec<Slot<VersionId, Resource>>,
    methods: Vec<Slot<ResourceId, Method>>,
    parameters: Vec<Slot<MethodId, Parameter>>,
    locators: Vec<Slot<ResourceId, Locator>>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Services of the model, sorted by name.
    pub fn services(&self) -> &[ServiceId] {
        &self.service_order
    }

    /// Look up the owner of any child entity.
    pub fn owner<C: Child>(&self, child: C) -> C::Owner {
        child.owner_in(self)
    }

    // Construction

    pub fn add_service(&mut self, service: impl Into<Option<Service>>) -> Option<ServiceId> {
        let mut service = service.into()?;
        service.versions.clear();

        let id = ServiceId::new(self.services.len());
        self.services.push(service);
        self.service_order.push(id);
        sort_by_name(&mut self.service_order, ServiceId::index, &self.services);
        Some(id)
    }

    pub fn add_version(
        &mut self,
        service: ServiceId,
        version: impl Into<Option<Version>>,
    ) -> Option<VersionId> {
        let mut version = version.into()?;
        let parent = self.services.get_mut(service.index())?;
        version.types.clear();
        version.resources.clear();

        let id = VersionId::new(self.versions.len());
        self.versions.push(Slot {
            owner: service,
            value: version,
        });
        parent.versions.push(id);
        sort_by_name(&mut parent.versions, VersionId::index, &self.versions);
        Some(id)
    }

    pub fn add_type(&mut self, version: VersionId, ty: impl Into<Option<Type>>) -> Option<TypeId> {
        let ty = ty.into()?;
        let parent = &mut self.versions.get_mut(version.index())?.value;

        let id = TypeId::new(self.types.len());
        self.types.push(Slot {
            owner: version,
            value: ty.detach(),
        });
        parent.types.push(id);
        sort_by_name(&mut parent.types, TypeId::index, &self.types);
        Some(id)
    }

    pub fn add_resource(
        &mut self,
        version: VersionId,
        resource: impl Into<Option<Resource>>,
    ) -> Option<ResourceId> {
        let mut resource = resource.into()?;
        let parent = &mut self.versions.get_mut(version.index())?.value;
        resource.methods.clear();
        resource.locators.clear();

        let id = ResourceId::new(self.resources.len());
        self.resources.push(Slot {
            owner: version,
            value: resource,
        });
        parent.resources.push(id);
        sort_by_name(&mut parent.resources, ResourceId::index, &self.resources);
        Some(id)
    }

    /// Add an attribute to a struct or class type. Other kinds of type have
    /// no attributes, so the call is a no-op for them.
    pub fn add_attribute(
        &mut self,
        ty: TypeId,
        attribute: impl Into<Option<Attribute>>,
    ) -> Option<AttributeId> {
        let attribute = attribute.into()?;
        let members = self.types.get_mut(ty.index())?.value.attributes_mut()?;

        let id = AttributeId::new(self.attributes.len());
        self.attributes.push(Slot {
            owner: ty,
            value: attribute,
        });
        members.push(id);
        sort_by_name(members, AttributeId::index, &self.attributes);
        Some(id)
    }

    /// Add a value to an enum type. Values keep their insertion order.
    pub fn add_value(&mut self, ty: TypeId, value: impl Into<Option<EnumValue>>) -> Option<EnumValueId> {
        let value = value.into()?;
        let members = self.types.get_mut(ty.index())?.value.values_mut()?;

        let id = EnumValueId::new(self.values.len());
        self.values.push(Slot { owner: ty, value });
        members.push(id);
        Some(id)
    }

    pub fn add_method(
        &mut self,
        resource: ResourceId,
        method: impl Into<Option<Method>>,
    ) -> Option<MethodId> {
        let mut method = method.into()?;
        let parent = &mut self.resources.get_mut(resource.index())?.value;
        method.parameters.clear();

        let id = MethodId::new(self.methods.len());
        self.methods.push(Slot {
            owner: resource,
            value: method,
        });
        parent.methods.push(id);
        sort_by_name(&mut parent.methods, MethodId::index, &self.methods);
        Some(id)
    }

    /// Add a parameter to a method. Parameters keep declaration order.
    pub fn add_parameter(
        &mut self,
        method: MethodId,
        parameter: impl Into<Option<Parameter>>,
    ) -> Option<ParameterId> {
        let parameter = parameter.into()?;
        let parent = &mut self.methods.get_mut(method.index())?.value;

        let id = ParameterId::new(self.parameters.len());
        self.parameters.push(Slot {
            owner: method,
            value: parameter,
        });
        parent.parameters.push(id);
        Some(id)
    }

    /// Add a locator to a resource.
    ///
    /// More than one variable locator is accepted; [`Model::variable_locator`]
    /// returns the first one in name order and the model lints flag the
    /// resource.
    pub fn add_locator(
        &mut self,
        resource: ResourceId,
        locator: impl Into<Option<Locator>>,
    ) -> Option<LocatorId> {
        let locator = locator.into()?;
        let parent = &mut self.resources.get_mut(resource.index())?.value;

        let id = LocatorId::new(self.locators.len());
        self.locators.push(Slot {
            owner: resource,
            value: locator,
        });
        parent.locators.push(id);
        sort_by_name(&mut parent.locators, LocatorId::index, &self.locators);
        Some(id)
    }

    // Lookup

    pub fn find_service(&self, name: &Name) -> Option<ServiceId> {
        find_by_name(&self.service_order, ServiceId::index, &self.services, name)
    }

    pub fn find_version(&self, service: ServiceId, name: &Name) -> Option<VersionId> {
        let parent = self.get_service(service)?;
        find_by_name(&parent.versions, VersionId::index, &self.versions, name)
    }

    pub fn find_type(&self, version: VersionId, name: &Name) -> Option<TypeId> {
        let parent = self.get_version(version)?;
        find_by_name(&parent.types, TypeId::index, &self.types, name)
    }

    pub fn find_resource(&self, version: VersionId, name: &Name) -> Option<ResourceId> {
        let parent = self.get_version(version)?;
        find_by_name(&parent.resources, ResourceId::index, &self.resources, name)
    }

    pub fn find_attribute(&self, ty: TypeId, name: &Name) -> Option<AttributeId> {
        let parent = self.get_type(ty)?;
        find_by_name(parent.attributes(), AttributeId::index, &self.attributes, name)
    }

    pub fn find_value(&self, ty: TypeId, name: &Name) -> Option<EnumValueId> {
        let parent = self.get_type(ty)?;
        find_by_name(parent.values(), EnumValueId::index, &self.values, name)
    }

    pub fn find_method(&self, resource: ResourceId, name: &Name) -> Option<MethodId> {
        let parent = self.get_resource(resource)?;
        find_by_name(&parent.methods, MethodId::index, &self.methods, name)
    }

    pub fn find_parameter(&self, method: MethodId, name: &Name) -> Option<ParameterId> {
        let parent = self.get_method(method)?;
        find_by_name(&parent.parameters, ParameterId::index, &self.parameters, name)
    }

    pub fn find_locator(&self, resource: ResourceId, name: &Name) -> Option<LocatorId> {
        let parent = self.get_resource(resource)?;
        find_by_name(&parent.locators, LocatorId::index, &self.locators, name)
    }

    /// The first variable locator of the resource, in name order.
    pub fn variable_locator(&self, resource: ResourceId) -> Option<LocatorId> {
        self.get_resource(resource)?
            .locators
            .iter()
            .copied()
            .find(|id| self.locator(*id).is_variable())
    }

    /// Every locator of the resource that isn't variable, in name order.
    pub fn constant_locators(&self, resource: ResourceId) -> Vec<LocatorId> {
        self.get_resource(resource)
            .map(|r| {
                r.locators
                    .iter()
                    .copied()
                    .filter(|id| !self.locator(*id).is_variable())
                    .collect()
            })
            .unwrap_or_default()
    }
}

macro_rules! accessors {
    ($($get:ident, $get_opt:ident, $get_mut:ident, $field:ident: $id:ty => $ty:ty;)*) => {
        impl Model {
            $(
                #[doc = concat!("Get a [`", stringify!($ty), "`] by handle.")]
                ///
                /// # Panics
                ///
                /// Panics if the handle doesn't belong to this model.
                pub fn $get(&self, id: $id) -> &$ty {
                    &self.$field[id.index()].value
                }

                pub fn $get_opt(&self, id: $id) -> Option<&$ty> {
                    self.$field.get(id.index()).map(|slot| &slot.value)
                }

                /// Mutable access, for filling in documentation and resolving
                /// references after the entity was added.
                pub fn $get_mut(&mut self, id: $id) -> Option<&mut $ty> {
                    self.$field.get_mut(id.index()).map(|slot| &mut slot.value)
                }
            )*
        }
    };
}

accessors! {
    version, get_version, version_mut, versions: VersionId => Version;
    ty, get_type, type_mut, types: TypeId => Type;
    attribute, get_attribute, attribute_mut, attributes: AttributeId => Attribute;
    value, get_value, value_mut, values: EnumValueId => EnumValue;
    resource, get_resource, resource_mut, resources: ResourceId => Resource;
    method, get_method, method_mut, methods: MethodId => Method;
    parameter, get_parameter, parameter_mut, parameters: ParameterId => Parameter;
    locator, get_locator, locator_mut, locators: LocatorId => Locator;
}

impl Model {
    /// Get a [`Service`] by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle doesn't belong to this model.
    pub fn service(&self, id: ServiceId) -> &Service {
        &self.services[id.index()]
    }

    pub fn get_service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(id.index())
    }

    pub fn service_mut(&mut self, id: ServiceId) -> Option<&mut Service> {
        self.services.get_mut(id.index())
    }
}

macro_rules! child {
    ($($id:ty => $owner:ty, $field:ident;)*) => {
        $(impl Child for $id {
            type Owner = $owner;

            fn owner_in(self, model: &Model) -> $owner {
                model.$field[self.index()].owner
            }
        })*
    };
}

child! {
    VersionId => ServiceId, versions;
    TypeId => VersionId, types;
    AttributeId => TypeId, attributes;
    EnumValueId => TypeId, values;
    ResourceId => VersionId, resources;
    MethodId => ResourceId, methods;
    ParameterId => MethodId, parameters;
    LocatorId => ResourceId, locators;
}
