pub mod url_alias;

pub use url_alias::Entity as UrlAliases;
pub use url_alias::Model as UrlAlias;
