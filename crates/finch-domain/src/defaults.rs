//! Seed taxonomy used when no category service is reachable.

use crate::category::Category;

type SeedRow = (
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
    &'static str,
);

const SEED: &[SeedRow] = &[
    ("groceries", "Groceries", Some("food"), "shopping-cart", "#4CAF50"),
    ("restaurant", "Restaurants", Some("food"), "utensils", "#FF9800"),
    ("fast_food", "Fast Food", Some("food"), "burger", "#FFC107"),
    ("coffee_shops", "Coffee Shops", Some("food"), "coffee", "#795548"),
    ("food", "Food & Dining", None, "utensils", "#FF5722"),
    ("gas", "Gas & Fuel", Some("transport"), "gas-pump", "#2196F3"),
    ("ride_share", "Ride Share", Some("transport"), "car", "#00BCD4"),
    ("public_transport", "Public Transit", Some("transport"), "bus", "#009688"),
    ("parking", "Parking", Some("transport"), "parking", "#607D8B"),
    ("transport", "Transportation", None, "car", "#3F51B5"),
    ("streaming", "Streaming Services", Some("entertainment"), "film", "#E91E63"),
    ("movies", "Movies & Theater", Some("entertainment"), "ticket", "#9C27B0"),
    ("music", "Music", Some("entertainment"), "music", "#673AB7"),
    ("games", "Gaming", Some("entertainment"), "gamepad", "#3F51B5"),
    ("entertainment", "Entertainment", None, "film", "#9C27B0"),
    ("clothing", "Clothing", Some("shopping"), "tshirt", "#E91E63"),
    ("electronics", "Electronics", Some("shopping"), "laptop", "#2196F3"),
    ("home_goods", "Home & Garden", Some("shopping"), "home", "#4CAF50"),
    ("shopping", "Shopping", None, "shopping-bag", "#FF9800"),
    ("pharmacy", "Pharmacy", Some("health"), "pills", "#F44336"),
    ("doctor", "Doctor Visits", Some("health"), "stethoscope", "#E91E63"),
    ("dental", "Dental", Some("health"), "tooth", "#00BCD4"),
    ("health", "Healthcare", None, "heart", "#F44336"),
    ("rent", "Rent", Some("housing"), "home", "#795548"),
    ("utilities", "Utilities", Some("housing"), "bolt", "#FFC107"),
    ("internet", "Internet", Some("housing"), "wifi", "#2196F3"),
    ("phone", "Phone", Some("housing"), "phone", "#009688"),
    ("housing", "Housing", None, "home", "#795548"),
    ("gym", "Gym & Fitness", Some("fitness"), "dumbbell", "#FF5722"),
    ("sports", "Sports", Some("fitness"), "basketball", "#FF9800"),
    ("fitness", "Fitness & Sports", None, "dumbbell", "#FF5722"),
    ("tuition", "Tuition", Some("education"), "graduation-cap", "#3F51B5"),
    ("books", "Books & Supplies", Some("education"), "book", "#2196F3"),
    ("courses", "Online Courses", Some("education"), "laptop", "#00BCD4"),
    ("education", "Education", None, "graduation-cap", "#3F51B5"),
    ("health_insurance", "Health Insurance", Some("insurance"), "shield", "#F44336"),
    ("auto_insurance", "Auto Insurance", Some("insurance"), "car", "#2196F3"),
    ("life_insurance", "Life Insurance", Some("insurance"), "heart", "#E91E63"),
    ("insurance", "Insurance", None, "shield", "#607D8B"),
    ("salary", "Salary", Some("income"), "dollar-sign", "#4CAF50"),
    ("freelance", "Freelance", Some("income"), "briefcase", "#00BCD4"),
    ("investment", "Investment Income", Some("income"), "chart-line", "#009688"),
    ("income", "Income", None, "dollar-sign", "#4CAF50"),
    ("gifts", "Gifts", None, "gift", "#E91E63"),
    ("charity", "Charity", None, "hand-holding-heart", "#9C27B0"),
    ("personal_care", "Personal Care", None, "spa", "#FF9800"),
    ("pets", "Pets", None, "paw", "#795548"),
    ("travel", "Travel", None, "plane", "#00BCD4"),
    ("subscriptions", "Subscriptions", None, "repeat", "#9C27B0"),
    ("uncategorized", "Uncategorized", None, "question", "#9E9E9E"),
];

/// Returns the default taxonomy seeded for new users, in seed order.
///
/// Every call mints fresh identifiers.
pub fn default_categories() -> Vec<Category> {
    SEED.iter()
        .map(|(name, display_name, parent, icon, color)| {
            let mut category = Category::new(*name, *display_name)
                .with_icon(*icon)
                .with_color(*color)
                .with_usage_count(0);
            category.parent_name = parent.map(str::to_string);
            category.is_default = true;
            category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn seed_names_are_unique() {
        let categories = default_categories();
        let names: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), categories.len());
        assert_eq!(categories.len(), 50);
    }

    #[test]
    fn every_seed_parent_exists() {
        let categories = default_categories();
        let names: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        for category in &categories {
            if let Some(parent) = category.parent() {
                assert!(names.contains(parent), "missing parent {parent}");
            }
        }
    }
}
