//! Wrapped token mints against a real cw20 using cw-multi-test.
//!
//! Contract addresses here are 32-byte bech32 addresses, as on chain, so
//! orders must name the wrapped token by its registered alias.

use cosmwasm_std::{Addr, Api, Binary, Uint128, Uint256};
use cw20::{BalanceResponse, Cw20QueryMsg};
use cw_multi_test::{MockAddressGenerator, MockApiBech32};
use cw_multi_test::{
    no_init, App, AppBuilder, AppResponse, BankKeeper, ContractWrapper, Executor, WasmKeeper,
};
use k256::ecdsa::SigningKey;

use token_bridge::address_codec::LocalAddress;
use token_bridge::hash::{evm_address_from_pubkey, keccak256, to_hex};
use token_bridge::msg::{
    ExecuteMsg, InstantiateMsg, QueryMsg, TokenAliasResponse, WrappedTokenResponse,
};
use token_bridge::order::{truncate_utf8, MintOrder};

// ============================================================================
// Test Setup
// ============================================================================

type BechApp = App<BankKeeper, MockApiBech32>;

const CHAIN_ID: u32 = 355113;
const DENOM: &str = "uluna";
const MINTER_KEY: [u8; 32] = [0x42; 32];
const RECIPIENT: LocalAddress = LocalAddress([0x33; 20]);

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        token_bridge::contract::execute,
        token_bridge::contract::instantiate,
        token_bridge::contract::query,
    )
    .with_reply(token_bridge::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn base_token_id() -> [u8; 32] {
    let mut id = [0u8; 32];
    id[31] = 0x01;
    id
}

fn sign_batch(key: &SigningKey, payload: &[u8]) -> Binary {
    let (sig, recid) = key.sign_prehash_recoverable(&keccak256(payload)).unwrap();
    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(recid.to_byte());
    Binary::from(bytes)
}

struct Suite {
    app: BechApp,
    bridge: Addr,
    owner: Addr,
    relayer: Addr,
    key: SigningKey,
}

fn setup() -> Suite {
    let mut app: BechApp = AppBuilder::default()
        .with_api(MockApiBech32::new("terra"))
        .with_wasm(WasmKeeper::default().with_address_generator(MockAddressGenerator))
        .build(no_init);
    let owner = app.api().addr_make("owner");
    let relayer = app.api().addr_make("relayer");
    let key = SigningKey::from_slice(&MINTER_KEY).unwrap();
    let point = key.verifying_key().to_encoded_point(false);
    let minter_address = to_hex(&evm_address_from_pubkey(point.as_bytes()).unwrap());

    let cw20_code_id = app.store_code(contract_cw20());
    let bridge_code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            bridge_code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                minter_address,
                minter_relayer: None,
                chain_id: CHAIN_ID,
                is_wrapped_side: true,
                native_denom: DENOM.to_string(),
                address_prefix: None,
                burn_fee: Uint128::zero(),
                fee_charge: None,
                wrapped_token_code_id: Some(cw20_code_id),
                mint_fee_params: None,
                native_metadata: None,
            },
            &[],
            "token-bridge",
            None,
        )
        .unwrap();

    Suite {
        app,
        bridge,
        owner,
        relayer,
        key,
    }
}

impl Suite {
    /// Deploy the wrapped token for the base id and return it with its alias
    fn deploy_wrapped(&mut self) -> (Addr, LocalAddress) {
        self.app
            .execute_contract(
                self.owner.clone(),
                self.bridge.clone(),
                &ExecuteMsg::DeployErc20 {
                    name: "Wrapped Token".to_string(),
                    symbol: "WTKN".to_string(),
                    decimals: 18,
                    base_token_id: Binary::from(base_token_id().to_vec()),
                },
                &[],
            )
            .unwrap();

        let res: WrappedTokenResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::WrappedToken {
                    base_token_id: Binary::from(base_token_id().to_vec()),
                },
            )
            .unwrap();
        let token = res.wrapped_token.unwrap();

        let res: TokenAliasResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::TokenAlias {
                    token: token.to_string(),
                },
            )
            .unwrap();
        assert!(res.registered);
        let alias = LocalAddress(res.alias.as_slice().try_into().unwrap());
        (token, alias)
    }

    fn batch_mint(&mut self, orders: &[MintOrder]) -> AppResponse {
        let payload: Vec<u8> = orders.iter().flat_map(|o| o.encode()).collect();
        let signature = sign_batch(&self.key, &payload);
        self.app
            .execute_contract(
                self.relayer.clone(),
                self.bridge.clone(),
                &ExecuteMsg::BatchMint {
                    encoded_orders: Binary::from(payload),
                    signature,
                    orders_to_process: vec![],
                },
                &[],
            )
            .unwrap()
    }

    fn balance(&self, token: &Addr, account: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance
    }
}

fn token_order(to_token: LocalAddress, nonce: u32, amount: u128) -> MintOrder {
    MintOrder {
        amount: Uint256::from(amount),
        sender_id: [0x11; 32],
        from_token_id: base_token_id(),
        recipient: RECIPIENT,
        to_token,
        nonce,
        sender_chain_id: 1,
        recipient_chain_id: CHAIN_ID,
        name: truncate_utf8("Wrapped Token"),
        symbol: truncate_utf8("WTKN"),
        decimals: 18,
        approve_spender: LocalAddress::ZERO,
        approve_amount: Uint256::zero(),
        fee_payer: LocalAddress::ZERO,
    }
}

fn results(res: &AppResponse) -> Vec<u8> {
    res.data.clone().unwrap().to_vec()
}

// ============================================================================
// Mints
// ============================================================================

#[test]
fn test_wrapped_token_address_differs_from_alias() {
    let mut suite = setup();
    let (token, alias) = suite.deploy_wrapped();

    // 32-byte contract addresses cannot travel in a 20-byte order field
    let canonical = suite.app.api().addr_canonicalize(token.as_str()).unwrap();
    assert_eq!(canonical.len(), 32);
    assert_eq!(alias.as_bytes().as_slice(), &keccak256(canonical.as_slice())[12..]);
}

#[test]
fn test_mint_pays_recipient_and_replay_is_rejected() {
    let mut suite = setup();
    let (token, alias) = suite.deploy_wrapped();
    let recipient = RECIPIENT.to_addr("terra").unwrap();
    let before = suite.balance(&token, &recipient);

    let res = suite.batch_mint(&[token_order(alias, 0, 1000)]);
    assert_eq!(results(&res), vec![0]);
    assert_eq!(suite.balance(&token, &recipient), before + Uint128::new(1000));
    assert_eq!(
        suite.balance(&token, &suite.bridge),
        Uint128::MAX - Uint128::new(1000)
    );

    let res = suite.batch_mint(&[token_order(alias, 0, 1000)]);
    assert_eq!(results(&res), vec![3]);
    assert_eq!(suite.balance(&token, &recipient), before + Uint128::new(1000));
}

#[test]
fn test_raw_address_bytes_are_not_bridged() {
    let mut suite = setup();
    let (token, _) = suite.deploy_wrapped();
    let canonical = suite.app.api().addr_canonicalize(token.as_str()).unwrap();

    // the leading 20 bytes of the real address are not its alias
    let raw = LocalAddress(canonical.as_slice()[..20].try_into().unwrap());
    let res = suite.batch_mint(&[token_order(raw, 0, 1000)]);

    assert_eq!(results(&res), vec![6]);
    let recipient = RECIPIENT.to_addr("terra").unwrap();
    assert_eq!(suite.balance(&token, &recipient), Uint128::zero());
}
