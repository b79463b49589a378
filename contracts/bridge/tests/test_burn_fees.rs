//! Integration tests for burns and burn fee accounting.
//!
//! Covers native and cw20 burns on the base side, the collected fee counter,
//! fee withdrawal, operation ids, memos and the per-account burn history.

use cosmwasm_std::{coins, from_json, Addr, Binary, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use token_bridge::burn_history::BURN_HISTORY_CAPACITY;
use token_bridge::msg::{
    BurnHistoryResponse, CollectedBurnFeesResponse, ExecuteMsg, InstantiateMsg,
    OperationByMemoResponse, OperationIdCounterResponse, QueryMsg, UserMemosResponse,
};

// ============================================================================
// Test Setup
// ============================================================================

const DENOM: &str = "uluna";
const BURN_FEE: u128 = 1_000;

fn contract_bridge() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        token_bridge::contract::execute,
        token_bridge::contract::instantiate,
        token_bridge::contract::query,
    );
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

fn setup() -> (App, Addr, Addr, Addr) {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &user, coins(10_000_000_000, DENOM))
            .unwrap();
    });

    let code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                minter_address: "0x1111111111111111111111111111111111111111".to_string(),
                minter_relayer: None,
                chain_id: 1,
                is_wrapped_side: false,
                native_denom: DENOM.to_string(),
                address_prefix: None,
                burn_fee: Uint128::new(BURN_FEE),
                fee_charge: None,
                wrapped_token_code_id: None,
                mint_fee_params: None,
                native_metadata: None,
            },
            &[],
            "token-bridge",
            None,
        )
        .unwrap();

    (app, bridge, owner, user)
}

fn setup_cw20(app: &mut App, holder: &Addr) -> Addr {
    let code_id = app.store_code(contract_cw20());
    app.instantiate_contract(
        code_id,
        holder.clone(),
        &cw20_base::msg::InstantiateMsg {
            name: "Test Token".to_string(),
            symbol: "TTK".to_string(),
            decimals: 6,
            initial_balances: vec![Cw20Coin {
                address: holder.to_string(),
                amount: Uint128::new(1_000_000),
            }],
            mint: None,
            marketing: None,
        },
        &[],
        "test-token",
        None,
    )
    .unwrap()
}

fn native_burn_msg(amount: u128, memo: Option<Binary>) -> ExecuteMsg {
    ExecuteMsg::Burn {
        amount: Uint128::new(amount),
        from_token: DENOM.to_string(),
        to_token_id: Binary::from(vec![0u8; 32]),
        recipient_id: Binary::from(vec![0xAA; 20]),
        memo,
    }
}

fn burn_native(app: &mut App, bridge: &Addr, user: &Addr, amount: u128) -> AppResponse {
    app.execute_contract(
        user.clone(),
        bridge.clone(),
        &native_burn_msg(amount, None),
        &coins(amount + BURN_FEE, DENOM),
    )
    .unwrap()
}

fn collected_fees(app: &App, bridge: &Addr) -> Uint128 {
    let res: CollectedBurnFeesResponse = app
        .wrap()
        .query_wasm_smart(bridge, &QueryMsg::CollectedBurnFees {})
        .unwrap();
    res.amount
}

fn cw20_balance(app: &App, token: &Addr, account: &Addr) -> Uint128 {
    let res: BalanceResponse = app
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

// ============================================================================
// Native Burns
// ============================================================================

#[test]
fn test_native_burn_collects_fee_and_emits_event() {
    let (mut app, bridge, _owner, user) = setup();

    let res = burn_native(&mut app, &bridge, &user, 5_000);

    let operation_id: u32 = from_json(res.data.unwrap()).unwrap();
    assert_eq!(operation_id, 0);
    assert_eq!(collected_fees(&app, &bridge), Uint128::new(BURN_FEE));
    assert_eq!(
        app.wrap().query_balance(&bridge, DENOM).unwrap().amount,
        Uint128::new(5_000 + BURN_FEE)
    );

    let event = res.events.iter().find(|e| e.ty == "wasm-burnt").unwrap();
    let attr = |key: &str| {
        event
            .attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.clone())
            .unwrap()
    };
    assert_eq!(attr("sender"), user.to_string());
    assert_eq!(attr("amount"), "5000");
    assert_eq!(attr("from_token"), DENOM);
    assert_eq!(attr("name"), "Ethereum");
    assert_eq!(attr("symbol"), "ETH");
    assert_eq!(attr("decimals"), "18");
    assert_eq!(attr("operation_id"), "0");
}

#[test]
fn test_native_burn_requires_exact_funds() {
    let (mut app, bridge, _owner, user) = setup();

    for funds in [5_000u128, 5_000 + BURN_FEE + 1] {
        let res = app.execute_contract(
            user.clone(),
            bridge.clone(),
            &native_burn_msg(5_000, None),
            &coins(funds, DENOM),
        );
        let err_str = res.unwrap_err().root_cause().to_string();
        assert!(err_str.contains("Invalid attached funds"), "got: {}", err_str);
    }

    assert_eq!(collected_fees(&app, &bridge), Uint128::zero());
}

#[test]
fn test_burn_rejects_zero_amount() {
    let (mut app, bridge, _owner, user) = setup();

    let res = app.execute_contract(
        user,
        bridge,
        &native_burn_msg(0, None),
        &coins(BURN_FEE, DENOM),
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid amount"), "got: {}", err_str);
}

#[test]
fn test_operation_ids_increment_per_burn() {
    let (mut app, bridge, _owner, user) = setup();

    for expected in 0..3u32 {
        let res = burn_native(&mut app, &bridge, &user, 100);
        let id: u32 = from_json(res.data.unwrap()).unwrap();
        assert_eq!(id, expected);
    }

    let res: OperationIdCounterResponse = app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::OperationIdCounter {})
        .unwrap();
    assert_eq!(res.next_operation_id, 3);
}

// ============================================================================
// Fee Accounting
// ============================================================================

#[test]
fn test_collected_fees_equal_burns_times_fee_and_withdraw_zeroes() {
    let (mut app, bridge, owner, user) = setup();
    let burns = 5u128;

    for _ in 0..burns {
        burn_native(&mut app, &bridge, &user, 100);
    }
    assert_eq!(collected_fees(&app, &bridge), Uint128::new(burns * BURN_FEE));

    let owner_before = app.wrap().query_balance(&owner, DENOM).unwrap().amount;
    let res = app
        .execute_contract(
            owner.clone(),
            bridge.clone(),
            &ExecuteMsg::WithdrawBurnFees {},
            &[],
        )
        .unwrap();
    assert!(res.events.iter().any(|e| e.ty == "wasm-burn_fees_withdrawn"));

    let owner_after = app.wrap().query_balance(&owner, DENOM).unwrap().amount;
    assert_eq!(owner_after - owner_before, Uint128::new(burns * BURN_FEE));
    assert_eq!(collected_fees(&app, &bridge), Uint128::zero());

    // burned amounts stay in custody
    assert_eq!(
        app.wrap().query_balance(&bridge, DENOM).unwrap().amount,
        Uint128::new(burns * 100)
    );

    let res = app.execute_contract(owner, bridge, &ExecuteMsg::WithdrawBurnFees {}, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("No burn fees to withdraw"), "got: {}", err_str);
}

#[test]
fn test_withdraw_requires_owner() {
    let (mut app, bridge, _owner, user) = setup();
    burn_native(&mut app, &bridge, &user, 100);

    let res = app.execute_contract(user, bridge.clone(), &ExecuteMsg::WithdrawBurnFees {}, &[]);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {}", err_str);
    assert_eq!(collected_fees(&app, &bridge), Uint128::new(BURN_FEE));
}

#[test]
fn test_update_burn_fee_applies_to_next_burn() {
    let (mut app, bridge, owner, user) = setup();

    let res = app.execute_contract(
        user.clone(),
        bridge.clone(),
        &ExecuteMsg::UpdateBurnFee {
            fee: Uint128::new(5),
        },
        &[],
    );
    assert!(res.is_err());

    let res = app
        .execute_contract(
            owner,
            bridge.clone(),
            &ExecuteMsg::UpdateBurnFee {
                fee: Uint128::new(5),
            },
            &[],
        )
        .unwrap();
    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-burn_fee_updated")
        .unwrap();
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "old_fee" && a.value == BURN_FEE.to_string()));
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "new_fee" && a.value == "5"));

    app.execute_contract(
        user,
        bridge.clone(),
        &native_burn_msg(100, None),
        &coins(105, DENOM),
    )
    .unwrap();
    assert_eq!(collected_fees(&app, &bridge), Uint128::new(5));
}

// ============================================================================
// CW20 Burns (base side)
// ============================================================================

#[test]
fn test_cw20_burn_takes_tokens_into_custody() {
    let (mut app, bridge, _owner, user) = setup();
    let token = setup_cw20(&mut app, &user);

    app.execute_contract(
        user.clone(),
        token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: bridge.to_string(),
            amount: Uint128::new(400),
            expires: None,
        },
        &[],
    )
    .unwrap();

    let res = app
        .execute_contract(
            user.clone(),
            bridge.clone(),
            &ExecuteMsg::Burn {
                amount: Uint128::new(400),
                from_token: token.to_string(),
                to_token_id: Binary::from(vec![0x01; 32]),
                recipient_id: Binary::from(vec![0xAA; 20]),
                memo: None,
            },
            &coins(BURN_FEE, DENOM),
        )
        .unwrap();

    assert_eq!(cw20_balance(&app, &token, &user), Uint128::new(1_000_000 - 400));
    assert_eq!(cw20_balance(&app, &token, &bridge), Uint128::new(400));
    assert_eq!(collected_fees(&app, &bridge), Uint128::new(BURN_FEE));

    let event = res.events.iter().find(|e| e.ty == "wasm-burnt").unwrap();
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "symbol" && a.value == "TTK"));
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "decimals" && a.value == "6"));
}

#[test]
fn test_cw20_burn_without_allowance_fails() {
    let (mut app, bridge, _owner, user) = setup();
    let token = setup_cw20(&mut app, &user);

    let res = app.execute_contract(
        user.clone(),
        bridge.clone(),
        &ExecuteMsg::Burn {
            amount: Uint128::new(400),
            from_token: token.to_string(),
            to_token_id: Binary::from(vec![0x01; 32]),
            recipient_id: Binary::from(vec![0xAA; 20]),
            memo: None,
        },
        &coins(BURN_FEE, DENOM),
    );
    assert!(res.is_err());

    // the failed transfer rolls back the whole burn
    assert_eq!(collected_fees(&app, &bridge), Uint128::zero());
    assert_eq!(cw20_balance(&app, &token, &user), Uint128::new(1_000_000));
}

#[test]
fn test_base_side_rejects_wrapped_native_redeem() {
    let (mut app, bridge, _owner, user) = setup();
    let token = setup_cw20(&mut app, &user);

    let res = app.execute_contract(
        user,
        bridge,
        &ExecuteMsg::Burn {
            amount: Uint128::new(400),
            from_token: token.to_string(),
            to_token_id: Binary::from(vec![0u8; 32]),
            recipient_id: Binary::from(vec![0xAA; 20]),
            memo: None,
        },
        &coins(BURN_FEE, DENOM),
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("not allowed on this side"), "got: {}", err_str);
}

// ============================================================================
// Memos & History
// ============================================================================

#[test]
fn test_memo_indexes_operation() {
    let (mut app, bridge, _owner, user) = setup();
    burn_native(&mut app, &bridge, &user, 100);

    let memo = Binary::from(vec![0x5A; 32]);
    app.execute_contract(
        user.clone(),
        bridge.clone(),
        &native_burn_msg(100, Some(memo.clone())),
        &coins(100 + BURN_FEE, DENOM),
    )
    .unwrap();

    let res: OperationByMemoResponse = app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::OperationByMemo {
                user: user.to_string(),
                memo: memo.clone(),
            },
        )
        .unwrap();
    assert_eq!(res.operation_id, Some(1));

    let res: UserMemosResponse = app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::UserMemos {
                user: user.to_string(),
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(res.memos.len(), 1);
    assert_eq!(res.memos[0].memo, memo);
    assert_eq!(res.memos[0].operation_id, 1);

    let res = app.execute_contract(
        user,
        bridge,
        &native_burn_msg(100, Some(Binary::from(vec![0x5A; 31]))),
        &coins(100 + BURN_FEE, DENOM),
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Invalid length for memo"), "got: {}", err_str);
}

#[test]
fn test_burn_history_keeps_latest_255_heights() {
    let (mut app, bridge, _owner, user) = setup();
    let first_height = app.block_info().height;

    // burn #n lands at first_height + n - 1
    for _ in 0..256 {
        burn_native(&mut app, &bridge, &user, 1);
        app.update_block(|block| block.height += 1);
    }

    let res: BurnHistoryResponse = app
        .wrap()
        .query_wasm_smart(
            &bridge,
            &QueryMsg::BurnHistory {
                account: user.to_string(),
            },
        )
        .unwrap();

    assert_eq!(res.heights.len(), BURN_HISTORY_CAPACITY);
    assert_eq!(res.heights[0], first_height + 1);
    assert_eq!(*res.heights.last().unwrap(), first_height + 255);
}

#[test]
fn test_notify_minter_emits_event_without_state_change() {
    let (mut app, bridge, _owner, user) = setup();

    let res = app
        .execute_contract(
            user.clone(),
            bridge.clone(),
            &ExecuteMsg::NotifyMinter {
                notification_type: 2,
                user_data: Binary::from(vec![0xBE, 0xEF]),
                memo: None,
            },
            &[],
        )
        .unwrap();

    let event = res
        .events
        .iter()
        .find(|e| e.ty == "wasm-notify_minter")
        .unwrap();
    let attr = |key: &str| {
        event
            .attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.clone())
    };
    assert_eq!(attr("notification_type").as_deref(), Some("2"));
    assert_eq!(attr("sender").as_deref(), Some(user.as_str()));
    assert_eq!(attr("user_data").as_deref(), Some("0xbeef"));
    assert_eq!(attr("memo"), None);

    let counter: OperationIdCounterResponse = app
        .wrap()
        .query_wasm_smart(&bridge, &QueryMsg::OperationIdCounter {})
        .unwrap();
    assert_eq!(counter.next_operation_id, 0);
    assert!(collected_fees(&app, &bridge).is_zero());
}
