use crate::semiorder::semiorder::SemiOrder;

/// @Entity
#[derive(Clone, Debug, Default)]
pub struct Order {
    ///
    #[bson = "_id,omitempty"]
    pub id: String,
    /// 구매자명
    #[bson = "buyerName"]
    pub buyer_name: String,
    /// 구매자 연락처
    #[bson = "buyerPhone"]
    pub buyer_phone: String,
    /// 결제 수단
    #[bson = "paymentMethod"]
    pub payment_method: String,
    /// 수취인명
    #[bson = "receiverName"]
    pub receiver_name: String,
    /// 배송비
    #[bson = "shippingFee"]
    pub shipping_fee: i64,
    /// 주문 상태
    #[bson = "orderStatus"]
    pub order_status: String,
    /// 저장되지 않음
    #[bson = "-"]
    pub unused_field: String,
    /// 세미오더
    #[bson = "semiOrder"]
    pub semi_order: SemiOrder,
    /// 사람 목록
    #[bson = "persons"]
    person: Option<Person>,
}

#[derive(Clone, Debug, Default)]
pub struct Person {
    #[bson = "name"]
    pub name: String,
}

/// @Entity("item_orders")
#[derive(Clone, Debug, Default)]
pub struct ItemOrder {
    #[bson = "_id,omitempty"]
    pub id: String,
    /// 주문 ID
    #[bson = "orderID"]
    pub order_id: String,
    /// 상품 번호
    #[bson = "itemID"]
    pub item_id: String,
}
