pub mod url_alias_sea;
