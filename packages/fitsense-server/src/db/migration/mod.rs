pub(crate) mod m00001_create_all_tables;
