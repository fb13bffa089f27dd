/// COCO class ids renamed for the farm context. Ids not listed keep the model's name.
pub const FARM_LABELS: &[(u32, &str)] = &[
    (0, "Farmworker / Person"),
    (1, "Bicycle / Motorcycle"),
    (2, "Vehicle / Tractor"),
    (5, "Machinery / Bus"),
    (7, "Heavy Machinery"),
    (16, "Animal (Dog)"),
    (17, "Animal (Cat)"),
    (21, "Wild Animal (Bear)"),
    (22, "Wild Animal"),
];

pub fn label_for(class_id: u32, model_name: Option<&str>) -> String {
    FARM_LABELS
        .iter()
        .find(|(id, _)| *id == class_id)
        .map(|(_, label)| label.to_string())
        .or_else(|| {
            model_name
                .filter(|n| !n.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("class {}", class_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_ids_override_model_names() {
        assert_eq!(label_for(0, Some("person")), "Farmworker / Person");
        assert_eq!(label_for(7, Some("truck")), "Heavy Machinery");
    }

    #[test]
    fn unmapped_ids_keep_model_name_or_id() {
        assert_eq!(label_for(19, Some("cow")), "cow");
        assert_eq!(label_for(19, None), "class 19");
        assert_eq!(label_for(19, Some(" ")), "class 19");
    }
}
