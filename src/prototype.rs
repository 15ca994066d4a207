//! Prototype protocol: copy an erased value without naming its type.
//!
//! Every concept object (`dyn ExprConcept`, `dyn PriceConcept`, ...) gets an
//! implementation of [`Prototype`] that forwards to the model's own
//! `clone_model`. The model was generated for the concrete type when the value
//! was erased, so the clone runs that type's `Clone` even though the caller
//! only holds a `Box<dyn ...>`.
//!
//! Cost: a prototype clone costs whatever the concrete `Clone` costs. For
//! composites that is the size of the whole subtree, never O(1).

pub trait Prototype {
    /// Returns an independently owned copy of `self`.
    fn prototype(&self) -> Box<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Animal {
        fn sound(&self) -> String;
        fn rename(&mut self, name: &str);
        fn clone_model(&self) -> Box<dyn Animal>;
    }

    impl Prototype for dyn Animal {
        fn prototype(&self) -> Box<Self> {
            self.clone_model()
        }
    }

    #[derive(Clone)]
    struct Sheep {
        name: String,
    }

    impl Animal for Sheep {
        fn sound(&self) -> String {
            format!("{}: baa", self.name)
        }

        fn rename(&mut self, name: &str) {
            self.name = name.to_string();
        }

        fn clone_model(&self) -> Box<dyn Animal> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_prototype_through_trait_object() {
        let dolly: Box<dyn Animal> = Box::new(Sheep {
            name: "dolly".to_string(),
        });
        let mut copy = dolly.prototype();
        assert_eq!(copy.sound(), "dolly: baa");

        copy.rename("polly");
        assert_eq!(copy.sound(), "polly: baa");
        assert_eq!(dolly.sound(), "dolly: baa");
    }
}
