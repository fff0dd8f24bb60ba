// Not an entity: no output file is generated for this module.
pub struct Order {
    #[bson = "_id,omitempty"]
    pub id: String,
    #[bson = "buyerName"]
    pub buyer_name: String,
}
