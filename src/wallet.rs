//! Optional browser wallet connection
//!
//! Reads the injected Ethereum provider, shows the connected address and its
//! balance. Nothing is signed or verified; tokens earned in the game stay
//! in memory.

use std::future::Future;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Please install MetaMask to connect your wallet")]
    ProviderNotFound,
    #[error("{0}")]
    Rejected(String),
    #[error("malformed balance: {0}")]
    MalformedBalance(String),
}

/// Requests the game makes of an injected wallet provider
pub trait WalletProvider {
    /// Accounts already authorised for this page (`eth_accounts`)
    fn accounts(&self) -> impl Future<Output = Result<Vec<String>, WalletError>>;
    /// Prompt the user to connect (`eth_requestAccounts`)
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<String>, WalletError>>;
    /// Latest balance as a hex wei string (`eth_getBalance`)
    fn balance_wei_hex(&self, address: &str)
    -> impl Future<Output = Result<String, WalletError>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Wallet {
    #[default]
    Disconnected,
    Connected {
        address: String,
        /// ETH to four decimals
        balance_eth: String,
    },
}

const WEI_PER_UNIT: u128 = 100_000_000_000_000; // 1e14, one ten-thousandth of an ETH

/// Convert a hex wei quantity (`0x...`) to ETH with four decimals
pub fn wei_hex_to_eth(hex: &str) -> Result<String, WalletError> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    let wei = u128::from_str_radix(digits, 16)
        .map_err(|_| WalletError::MalformedBalance(hex.to_string()))?;

    let units = wei / WEI_PER_UNIT + u128::from(wei % WEI_PER_UNIT >= WEI_PER_UNIT / 2);
    Ok(format!("{}.{:04}", units / 10_000, units % 10_000))
}

/// `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

impl Wallet {
    pub fn is_connected(&self) -> bool {
        matches!(self, Wallet::Connected { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Wallet::Connected { address, .. } => Some(address),
            Wallet::Disconnected => None,
        }
    }

    async fn connect_first<P: WalletProvider>(
        provider: &P,
        accounts: Vec<String>,
    ) -> Result<Option<Wallet>, WalletError> {
        let Some(address) = accounts.into_iter().next() else {
            return Ok(None);
        };
        let balance_eth = wei_hex_to_eth(&provider.balance_wei_hex(&address).await?)?;
        Ok(Some(Wallet::Connected {
            address,
            balance_eth,
        }))
    }

    /// Reconnect silently if the page is already authorised. Errors are
    /// logged and leave the wallet disconnected.
    pub async fn check_existing<P: WalletProvider>(provider: Option<&P>) -> Wallet {
        let Some(provider) = provider else {
            return Wallet::Disconnected;
        };
        let result = match provider.accounts().await {
            Ok(accounts) => Self::connect_first(provider, accounts).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(Some(wallet)) => wallet,
            Ok(None) => Wallet::Disconnected,
            Err(e) => {
                log::warn!("Error checking wallet connection: {e}");
                Wallet::Disconnected
            }
        }
    }

    /// Ask the provider for an account and read its balance
    pub async fn connect<P: WalletProvider>(provider: Option<&P>) -> Result<Wallet, WalletError> {
        let provider = provider.ok_or(WalletError::ProviderNotFound)?;
        let accounts = provider.request_accounts().await?;
        let wallet = Self::connect_first(provider, accounts)
            .await?
            .unwrap_or_default();
        if let Some(address) = wallet.address() {
            log::info!("Connected to {}", short_address(address));
        }
        Ok(wallet)
    }

    pub fn disconnect(&mut self) {
        *self = Wallet::Disconnected;
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserProvider;

#[cfg(target_arch = "wasm32")]
mod browser {
    use js_sys::{Array, Function, Object, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{WalletError, WalletProvider};

    /// `window.ethereum`
    pub struct BrowserProvider {
        ethereum: JsValue,
    }

    fn js_error(e: JsValue) -> WalletError {
        let message = Reflect::get(&e, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .or_else(|| e.as_string())
            .unwrap_or_else(|| "Failed to connect wallet".to_string());
        WalletError::Rejected(message)
    }

    fn strings(value: &JsValue) -> Vec<String> {
        Array::from(value)
            .iter()
            .filter_map(|v| v.as_string())
            .collect()
    }

    impl BrowserProvider {
        pub fn detect() -> Option<Self> {
            let window = web_sys::window()?;
            let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
            if ethereum.is_undefined() || ethereum.is_null() {
                return None;
            }
            Some(Self { ethereum })
        }

        async fn request(
            &self,
            method: &str,
            params: Option<Array>,
        ) -> Result<JsValue, WalletError> {
            let args = Object::new();
            Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
                .map_err(js_error)?;
            if let Some(params) = params {
                Reflect::set(&args, &JsValue::from_str("params"), &params).map_err(js_error)?;
            }

            let request: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
                .map_err(js_error)?
                .dyn_into()
                .map_err(js_error)?;
            let promise: Promise = request
                .call1(&self.ethereum, &args)
                .map_err(js_error)?
                .dyn_into()
                .map_err(js_error)?;
            JsFuture::from(promise).await.map_err(js_error)
        }
    }

    impl WalletProvider for BrowserProvider {
        async fn accounts(&self) -> Result<Vec<String>, WalletError> {
            Ok(strings(&self.request("eth_accounts", None).await?))
        }

        async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
            Ok(strings(&self.request("eth_requestAccounts", None).await?))
        }

        async fn balance_wei_hex(&self, address: &str) -> Result<String, WalletError> {
            let params = Array::of2(&JsValue::from_str(address), &JsValue::from_str("latest"));
            self.request("eth_getBalance", Some(params))
                .await?
                .as_string()
                .ok_or_else(|| WalletError::MalformedBalance("non-string balance".to_string()))
        }
    }
}
