mod helpers;

mod collection_test;
mod recipe_test;
mod router_test;
mod shopping_list_test;
mod short_link_test;
