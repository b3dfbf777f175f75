mod family;
mod pantry_item;
mod planned_meal;
mod recipe;
mod shopping_list;
mod shopping_list_item;

use sqlx_migrator::vec_box;

pub struct M0_1;

sqlx_migrator::sqlite_migration!(
    M0_1,
    "famplan",
    "m0_1",
    vec_box![],
    vec_box![
        family::CreateTable,
        recipe::CreateTable,
        recipe::CreateFamilyIdx,
        planned_meal::CreateTable,
        planned_meal::CreateFamilyIdx,
        pantry_item::CreateTable,
        pantry_item::CreateFamilyIdx,
        shopping_list::CreateTable,
        shopping_list_item::CreateTable,
        shopping_list_item::CreateKeyIdx
    ]
);
