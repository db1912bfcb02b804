pub mod flutterwave;
pub mod paystack;

pub use flutterwave::{FlutterwaveBankService, FlutterwaveConfig};
pub use paystack::{PaystackBankService, PaystackConfig};
