pub mod household_inventory;

/*
 One table, no relations. Rows are personal household stock: "food" / "rice" / 5.
 Everything past category + name is optional and the database fills the gaps
 (id, quantity = 1, created_at).
 */
