//! Order in which members are classified.
//!
//! Inherited members always go before members declared on the class itself. When a
//! supertype member and an overriding member would claim conflicting dispositions, this
//! order decides which registration lands first, so it must not be changed.

use beanwire_types::model::ClassModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSlot {
    Field(usize),
    Method(usize),
}

/// Inherited fields, inherited methods, declared fields, declared methods; each group
/// keeps enumeration order.
pub fn classification_order(class: &ClassModel, fields: &[usize], methods: &[usize]) -> Vec<MemberSlot> {
    let (declared_fields, inherited_fields): (Vec<usize>, Vec<usize>) = fields
        .iter()
        .partition(|&&idx| class.fields[idx].declaring_type == class.name);
    let (declared_methods, inherited_methods): (Vec<usize>, Vec<usize>) = methods
        .iter()
        .partition(|&&idx| class.methods[idx].declaring_type == class.name);

    let mut order = Vec::with_capacity(fields.len() + methods.len());
    order.extend(inherited_fields.into_iter().map(MemberSlot::Field));
    order.extend(inherited_methods.into_iter().map(MemberSlot::Method));
    order.extend(declared_fields.into_iter().map(MemberSlot::Field));
    order.extend(declared_methods.into_iter().map(MemberSlot::Method));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanwire_types::model::{FieldModel, MethodModel};

    fn class() -> ClassModel {
        let mut class = ClassModel::new("app.Child");
        class.fields = vec![
            FieldModel {
                name: "own".to_string(),
                declaring_type: "app.Child".to_string(),
                ..Default::default()
            },
            FieldModel {
                name: "base".to_string(),
                declaring_type: "app.Base".to_string(),
                ..Default::default()
            },
        ];
        class.methods = vec![
            MethodModel {
                name: "a".to_string(),
                declaring_type: "app.Child".to_string(),
                ..Default::default()
            },
            MethodModel {
                name: "b".to_string(),
                declaring_type: "app.Base".to_string(),
                ..Default::default()
            },
            MethodModel {
                name: "c".to_string(),
                declaring_type: "app.Base".to_string(),
                ..Default::default()
            },
        ];
        class
    }

    #[test]
    fn inherited_members_come_first() {
        let class = class();
        let order = classification_order(&class, &[0, 1], &[0, 1, 2]);
        assert_eq!(
            order,
            vec![
                MemberSlot::Field(1),
                MemberSlot::Method(1),
                MemberSlot::Method(2),
                MemberSlot::Field(0),
                MemberSlot::Method(0),
            ]
        );
    }

    #[test]
    fn filtered_members_are_skipped() {
        let class = class();
        let order = classification_order(&class, &[0], &[2]);
        assert_eq!(order, vec![MemberSlot::Method(2), MemberSlot::Field(0)]);
    }
}
