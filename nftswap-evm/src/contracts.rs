//! Solidity interface definitions for on-chain interactions.
//!
//! Contains the minimal ABI surface the SDK needs:
//! - [`IERC20`] / [`IERC721`] / [`IERC1155`] — token allowance, approval,
//!   and safe-transfer entry points
//! - [`IExchangeV3`] — the v3 exchange (fill, cancel, batch cancel,
//!   cancel-up-to, order info) and its `Order` struct
//! - [`IExchangeV4`] — the v4 exchange proxy (buy/sell per NFT standard,
//!   cancel, status) and its order/fee/property structs
//!
//! The v3 `Order` and v4 `ERC721Order`/`ERC1155Order` structs double as the
//! EIP-712 typed-data schemas; field names and order must match the on-chain
//! definitions exactly or hashes diverge.

use alloy_sol_types::sol;

sol! {
    /// Minimal ERC-20 interface for allowance and approval management.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    /// Minimal ERC-721 interface.
    ///
    /// `getApproved` exposes the per-token approval, which is a distinct
    /// (weaker) grant than `isApprovedForAll`; the approval checker reports
    /// both. The four-argument `safeTransferFrom` overload carries the
    /// order-and-signature payload for approval-free sells.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC721 {
        function ownerOf(uint256 tokenId) external view returns (address);
        function getApproved(uint256 tokenId) external view returns (address);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function setApprovalForAll(address operator, bool approved) external;
        function safeTransferFrom(address from, address to, uint256 tokenId, bytes data) external;
    }
}

sol! {
    /// Minimal ERC-1155 interface. ERC-1155 has no per-token approval;
    /// `isApprovedForAll` is the only grant.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC1155 {
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function setApprovalForAll(address operator, bool approved) external;
        function safeTransferFrom(address from, address to, uint256 id, uint256 amount, bytes data) external;
    }
}

sol! {
    /// A v3 order. Also the EIP-712 struct hashed and signed by the maker;
    /// the domain is (name "0x Protocol", version "3.0.0").
    #[derive(Debug, PartialEq, Eq)]
    struct Order {
        address makerAddress;
        address takerAddress;
        address feeRecipientAddress;
        address senderAddress;
        uint256 makerAssetAmount;
        uint256 takerAssetAmount;
        uint256 makerFee;
        uint256 takerFee;
        uint256 expirationTimeSeconds;
        uint256 salt;
        bytes makerAssetData;
        bytes takerAssetData;
        bytes makerFeeAssetData;
        bytes takerFeeAssetData;
    }

    /// The v3 exchange contract surface used by the SDK.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IExchangeV3 {
        struct OrderInfo {
            uint8 orderStatus;
            bytes32 orderHash;
            uint256 orderTakerAssetFilledAmount;
        }

        struct FillResults {
            uint256 makerAssetFilledAmount;
            uint256 takerAssetFilledAmount;
            uint256 makerFeePaid;
            uint256 takerFeePaid;
            uint256 protocolFeePaid;
        }

        function fillOrder(Order order, uint256 takerAssetFillAmount, bytes signature) external payable returns (FillResults);
        function cancelOrder(Order order) external;
        function batchCancelOrders(Order[] orders) external;
        function cancelOrdersUpTo(uint256 targetOrderEpoch) external;
        function getOrderInfo(Order order) external view returns (OrderInfo);
    }

    /// EIP-1271 contract-wallet signing payload: the order together with its
    /// own hash, ABI-encoded as this call. Contract wallets sign the keccak
    /// of the encoded payload.
    #[allow(missing_docs)]
    interface IEip1271Data {
        function OrderWithHash(Order order, bytes32 orderHash) external;
    }
}

sol! {
    /// A fee disbursed to `recipient` when a v4 order is filled.
    #[derive(Debug, PartialEq, Eq)]
    struct Fee {
        address recipient;
        uint256 amount;
        bytes feeData;
    }

    /// A property constraint for collection-wide v4 offers; `propertyValidator`
    /// is consulted with `propertyData` at fill time.
    #[derive(Debug, PartialEq, Eq)]
    struct Property {
        address propertyValidator;
        bytes propertyData;
    }

    /// A v4 ERC-721 order. Also the EIP-712 struct hashed and signed by the
    /// maker; the domain is (name "ZeroEx", version "1.0.0").
    #[derive(Debug, PartialEq, Eq)]
    struct ERC721Order {
        uint8 direction;
        address maker;
        address taker;
        uint256 expiry;
        uint256 nonce;
        address erc20Token;
        uint256 erc20TokenAmount;
        Fee[] fees;
        address erc721Token;
        uint256 erc721TokenId;
        Property[] erc721TokenProperties;
    }

    /// A v4 ERC-1155 order.
    #[derive(Debug, PartialEq, Eq)]
    struct ERC1155Order {
        uint8 direction;
        address maker;
        address taker;
        uint256 expiry;
        uint256 nonce;
        address erc20Token;
        uint256 erc20TokenAmount;
        Fee[] fees;
        address erc1155Token;
        uint256 erc1155TokenId;
        Property[] erc1155TokenProperties;
        uint128 erc1155TokenAmount;
    }

    /// The v4 exchange proxy surface used by the SDK.
    ///
    /// Cancellation is asymmetric by design: ERC-721 orders cancel by nonce
    /// alone, ERC-1155 orders require the full order.
    #[allow(missing_docs)]
    #[allow(clippy::too_many_arguments)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IExchangeV4 {
        struct Signature {
            uint8 signatureType;
            uint8 v;
            bytes32 r;
            bytes32 s;
        }

        struct OrderInfo {
            bytes32 orderHash;
            uint8 status;
            uint128 orderAmount;
            uint128 remainingAmount;
        }

        function buyERC721(ERC721Order sellOrder, Signature signature, bytes callbackData) external payable;
        function sellERC721(ERC721Order buyOrder, Signature signature, uint256 erc721TokenId, bool unwrapNativeToken, bytes callbackData) external;
        function buyERC1155(ERC1155Order sellOrder, Signature signature, uint128 erc1155BuyAmount, bytes callbackData) external payable;
        function sellERC1155(ERC1155Order buyOrder, Signature signature, uint256 erc1155TokenId, uint128 erc1155SellAmount, bool unwrapNativeToken, bytes callbackData) external;
        function cancelERC721Order(uint256 orderNonce) external;
        function cancelERC1155Order(ERC1155Order order) external;
        function getERC721OrderStatus(ERC721Order order) external view returns (uint8);
        function getERC1155OrderInfo(ERC1155Order order) external view returns (OrderInfo);
    }
}
