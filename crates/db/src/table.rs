use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Family {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    FamilyId,
    Name,
    Ingredients,
    Servings,
}

#[derive(Iden, Clone)]
pub enum PlannedMeal {
    Table,
    Id,
    FamilyId,
    RecipeId,
    ScheduledFor,
    Servings,
    Status,
}

#[derive(Iden, Clone)]
pub enum PantryItem {
    Table,
    Id,
    FamilyId,
    Name,
    Quantity,
    Unit,
    Category,
    LowStock,
}

#[derive(Iden, Clone)]
pub enum ShoppingList {
    Table,
    Id,
    FamilyId,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingListItem {
    Table,
    Id,
    ShoppingListId,
    Name,
    NormalizedName,
    Quantity,
    Unit,
    Category,
    Aisle,
    Completed,
    Source,
    RecipeId,
    MealIds,
    Priority,
}
