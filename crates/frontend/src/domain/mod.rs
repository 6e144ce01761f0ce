pub mod a001_asset;
pub mod a002_employee;
pub mod a003_sim_card;
pub mod a004_software_license;
pub mod a005_purchase_order;
pub mod a006_accessory;
pub mod a007_master_data;
