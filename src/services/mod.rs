mod asset_admin_impl;

pub use asset_admin_impl::AssetAdminServiceImpl;
