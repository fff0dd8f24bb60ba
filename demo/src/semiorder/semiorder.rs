/// @Entity
#[derive(Clone, Debug, Default)]
pub struct SemiOrder {
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
    /// 수취인 연락처
    #[bson = "receiverPhone"]
    pub receiver_phone: String,
    /// 내부 메모
    #[bson = "-"]
    pub internal_memo: String,
}
