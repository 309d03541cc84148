use std::{any::TypeId, collections::HashMap};

/// A simple type-based registry for storing and retrieving values of different types.
/// I'm not sure if we'll use this yet...but it could prove useful (Python possibly?)
#[derive(Default)]
pub struct Regristry {
    records: HashMap<TypeId, Box<dyn std::any::Any>>,
}

impl Regristry {
    pub fn insert<T: 'static>(&mut self, value: T) {
        self.records.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.records
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.records
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<T>())
    }

    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.records
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }
}
