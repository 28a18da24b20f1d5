pub mod callback_query;
