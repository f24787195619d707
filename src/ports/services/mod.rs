mod asset_admin;

pub use asset_admin::AssetAdminService;
