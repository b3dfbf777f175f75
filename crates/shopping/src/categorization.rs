use serde::{Serialize, Serializer};

/// Category for grocery store organization
///
/// Variants are declared in store-walk order, which is also the order proposed
/// items are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    Pantry,
    Spices,
    Frozen,
    Beverages,
    Uncategorized,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Seafood => "Seafood",
            Category::Bakery => "Bakery",
            Category::Pantry => "Pantry",
            Category::Spices => "Spices",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Uncategorized => "Uncategorized",
        }
    }

    pub fn aisle(&self) -> &'static str {
        match self {
            Category::Produce => "Fresh Produce",
            Category::Dairy => "Dairy & Eggs",
            Category::Meat => "Butcher",
            Category::Seafood => "Seafood Counter",
            Category::Bakery => "Bakery",
            Category::Pantry => "Dry Goods",
            Category::Spices => "Spices & Seasonings",
            Category::Frozen => "Frozen Foods",
            Category::Beverages => "Beverages",
            Category::Uncategorized => "Other",
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Map a normalized ingredient name to a grocery store category.
///
/// Looks the whole name up first, then the last two words ("vanilla ice
/// cream"), then the head word ("cherry tomato"). Names nothing matches are
/// [`Category::Uncategorized`].
pub fn categorize(normalized_name: &str) -> Category {
    let name = normalized_name.trim().to_lowercase();

    if let Some(category) = lookup(&name) {
        return category;
    }

    if name.starts_with("frozen ") {
        return Category::Frozen;
    }

    let words: Vec<&str> = name.split_whitespace().collect();

    if words.len() > 2
        && let Some(category) = lookup(&words[words.len() - 2..].join(" "))
    {
        return category;
    }

    if words.len() > 1
        && let Some(category) = words.last().and_then(|head| lookup(head))
    {
        return category;
    }

    Category::Uncategorized
}

fn lookup(name: &str) -> Option<Category> {
    if is_produce(name) {
        return Some(Category::Produce);
    }

    if is_dairy(name) {
        return Some(Category::Dairy);
    }

    if is_meat(name) {
        return Some(Category::Meat);
    }

    if is_seafood(name) {
        return Some(Category::Seafood);
    }

    if is_bakery(name) {
        return Some(Category::Bakery);
    }

    if is_pantry(name) {
        return Some(Category::Pantry);
    }

    if is_spice(name) {
        return Some(Category::Spices);
    }

    if is_frozen(name) {
        return Some(Category::Frozen);
    }

    if is_beverage(name) {
        return Some(Category::Beverages);
    }

    None
}

fn is_produce(name: &str) -> bool {
    matches!(
        name,
        // Vegetables
        "tomato"
            | "onion"
            | "red onion"
            | "green onion"
            | "scallion"
            | "shallot"
            | "garlic"
            | "lettuce"
            | "carrot"
            | "celery"
            | "bell pepper"
            | "cucumber"
            | "zucchini"
            | "broccoli"
            | "cauliflower"
            | "spinach"
            | "kale"
            | "cabbage"
            | "potato"
            | "sweet potato"
            | "mushroom"
            | "green bean"
            | "pea"
            | "corn"
            | "avocado"
            | "eggplant"
            | "squash"
            | "asparagus"
            | "jalapeño"
            | "jalapeno"
            | "ginger"
            // Herbs
            | "cilantro"
            | "parsley"
            | "basil"
            | "basil leaf"
            | "mint"
            | "thyme"
            | "rosemary"
            | "dill"
            // Fruits
            | "apple"
            | "banana"
            | "orange"
            | "lemon"
            | "lime"
            | "strawberry"
            | "blueberry"
            | "raspberry"
            | "grape"
            | "mango"
            | "pineapple"
            | "watermelon"
            | "peach"
    )
}

fn is_dairy(name: &str) -> bool {
    matches!(
        name,
        "milk"
            | "whole milk"
            | "cream"
            | "heavy cream"
            | "whipping cream"
            | "sour cream"
            | "butter"
            | "unsalted butter"
            | "cheese"
            | "cheddar"
            | "cheddar cheese"
            | "mozzarella"
            | "mozzarella cheese"
            | "parmesan"
            | "parmesan cheese"
            | "feta"
            | "feta cheese"
            | "goat cheese"
            | "cream cheese"
            | "yogurt"
            | "greek yogurt"
            | "cottage cheese"
            | "ricotta"
            | "ricotta cheese"
            | "egg"
    )
}

fn is_meat(name: &str) -> bool {
    matches!(
        name,
        // Poultry
        "chicken"
            | "chicken breast"
            | "chicken thigh"
            | "turkey"
            | "ground turkey"
            | "duck"
            // Beef
            | "beef"
            | "ground beef"
            | "steak"
            | "brisket"
            | "roast"
            // Pork
            | "pork"
            | "bacon"
            | "ham"
            | "sausage"
            | "pork chop"
            // Other
            | "lamb"
            | "veal"
    )
}

fn is_seafood(name: &str) -> bool {
    matches!(
        name,
        "fish"
            | "salmon"
            | "tuna"
            | "cod"
            | "tilapia"
            | "shrimp"
            | "prawn"
            | "lobster"
            | "crab"
            | "scallop"
            | "mussel"
    )
}

fn is_bakery(name: &str) -> bool {
    matches!(
        name,
        "bread"
            | "baguette"
            | "ciabatta"
            | "sourdough"
            | "whole wheat bread"
            | "tortilla"
            | "pita bread"
            | "bagel"
            | "croissant"
            | "bun"
            | "hamburger bun"
            | "hot dog bun"
    )
}

fn is_pantry(name: &str) -> bool {
    matches!(
        name,
        // Grains & Pasta
        "flour"
            | "all-purpose flour"
            | "bread flour"
            | "rice"
            | "white rice"
            | "brown rice"
            | "pasta"
            | "spaghetti"
            | "penne"
            | "oat"
            | "quinoa"
            | "couscous"
            | "lentil"
            // Baking
            | "sugar"
            | "brown sugar"
            | "powdered sugar"
            | "baking powder"
            | "baking soda"
            | "yeast"
            | "cocoa powder"
            | "chocolate chip"
            // Oils & Condiments
            | "oil"
            | "olive oil"
            | "extra-virgin olive oil"
            | "vegetable oil"
            | "coconut oil"
            | "vinegar"
            | "balsamic vinegar"
            | "soy sauce"
            | "worcestershire sauce"
            | "ketchup"
            | "mustard"
            | "mayonnaise"
            | "hot sauce"
            // Canned/Jarred
            | "tomato sauce"
            | "tomato paste"
            | "canned tomato"
            | "chicken broth"
            | "beef broth"
            | "vegetable broth"
            | "bean"
            | "black bean"
            | "kidney bean"
            | "chickpea"
            | "peanut butter"
            | "jam"
            | "honey"
            | "maple syrup"
            // Nuts & Seeds
            | "almond"
            | "walnut"
            | "pecan"
            | "cashew"
            | "peanut"
            | "sunflower seed"
            | "chia seed"
    )
}

fn is_spice(name: &str) -> bool {
    matches!(
        name,
        "salt"
            | "kosher salt"
            | "sea salt"
            | "pepper"
            | "black pepper"
            | "paprika"
            | "smoked paprika"
            | "cumin"
            | "coriander"
            | "turmeric"
            | "cinnamon"
            | "nutmeg"
            | "oregano"
            | "bay leaf"
            | "chili powder"
            | "cayenne pepper"
            | "garlic powder"
            | "onion powder"
            | "red pepper flake"
            | "vanilla extract"
    )
}

fn is_frozen(name: &str) -> bool {
    matches!(
        name,
        "frozen vegetable"
            | "frozen pea"
            | "frozen corn"
            | "frozen berry"
            | "ice cream"
            | "frozen pizza"
            | "french fry"
    )
}

fn is_beverage(name: &str) -> bool {
    matches!(
        name,
        "coffee"
            | "tea"
            | "juice"
            | "orange juice"
            | "apple juice"
            | "sparkling water"
            | "soda"
            | "wine"
            | "red wine"
            | "white wine"
            | "beer"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_produce() {
        assert_eq!(categorize("tomato"), Category::Produce);
        assert_eq!(categorize("onion"), Category::Produce);
        assert_eq!(categorize("apple"), Category::Produce);
        assert_eq!(categorize("cilantro"), Category::Produce);
    }

    #[test]
    fn test_categorize_meat_and_seafood_apart() {
        assert_eq!(categorize("chicken breast"), Category::Meat);
        assert_eq!(categorize("ground beef"), Category::Meat);
        assert_eq!(categorize("salmon"), Category::Seafood);
        assert_eq!(categorize("shrimp"), Category::Seafood);
    }

    #[test]
    fn test_categorize_pantry_and_spices_apart() {
        assert_eq!(categorize("flour"), Category::Pantry);
        assert_eq!(categorize("olive oil"), Category::Pantry);
        assert_eq!(categorize("salt"), Category::Spices);
        assert_eq!(categorize("garlic powder"), Category::Spices);
    }

    #[test]
    fn test_exact_match_beats_head_word() {
        assert_eq!(categorize("tomato sauce"), Category::Pantry);
        assert_eq!(categorize("chicken broth"), Category::Pantry);
        assert_eq!(categorize("garlic"), Category::Produce);
    }

    #[test]
    fn test_categorize_falls_back_to_head_word() {
        assert_eq!(categorize("cherry tomato"), Category::Produce);
        assert_eq!(categorize("sharp cheddar cheese"), Category::Dairy);
        assert_eq!(categorize("smoked salmon"), Category::Seafood);
        assert_eq!(categorize("vanilla ice cream"), Category::Frozen);
        assert_eq!(categorize("frozen spinach"), Category::Frozen);
    }

    #[test]
    fn test_categorize_unknown() {
        assert_eq!(categorize("unknown_ingredient"), Category::Uncategorized);
        assert_eq!(categorize("xyz"), Category::Uncategorized);
        assert_eq!(categorize(""), Category::Uncategorized);
    }

    #[test]
    fn test_categorize_case_insensitive() {
        assert_eq!(categorize("  TOMATO "), Category::Produce);
        assert_eq!(categorize("Milk"), Category::Dairy);
    }

    #[test]
    fn test_category_strings() {
        assert_eq!(Category::Produce.as_str(), "Produce");
        assert_eq!(Category::Uncategorized.as_str(), "Uncategorized");
        assert_eq!(Category::Produce.aisle(), "Fresh Produce");
        assert_eq!(Category::Meat.aisle(), "Butcher");
    }

    #[test]
    fn test_store_walk_order() {
        let mut categories = vec![
            Category::Uncategorized,
            Category::Frozen,
            Category::Produce,
            Category::Pantry,
        ];
        categories.sort();
        assert_eq!(
            categories,
            vec![
                Category::Produce,
                Category::Pantry,
                Category::Frozen,
                Category::Uncategorized
            ]
        );
    }
}
