//! `/locations` endpoints

use serde::Serialize;
use shared::{
    CityList, Location, LocationCreate, LocationEnvelope, LocationFilter, LocationList,
    ProvinceList,
};

use super::SunoApi;
use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Serialize)]
struct CityQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    province: Option<&'a str>,
}

impl<H: HttpClient> SunoApi<H> {
    /// `GET /locations?type=&parent_id=&search=`
    pub async fn locations(&self, filter: &LocationFilter) -> ClientResult<Vec<Location>> {
        let resp: LocationList = self.http.get_query("/locations", filter).await?;
        Ok(resp.locations)
    }

    /// `POST /locations`
    pub async fn create_location(&self, location: &LocationCreate) -> ClientResult<Location> {
        let resp: LocationEnvelope = self.http.post("/locations", location).await?;
        Ok(resp.location)
    }

    /// `GET /locations/provinces`
    pub async fn provinces(&self) -> ClientResult<Vec<String>> {
        let resp: ProvinceList = self.http.get("/locations/provinces").await?;
        Ok(resp.provinces)
    }

    /// `GET /locations/cities?province=`
    pub async fn cities(&self, province: Option<&str>) -> ClientResult<Vec<String>> {
        let resp: CityList = self
            .http
            .get_query("/locations/cities", &CityQuery { province })
            .await?;
        Ok(resp.cities)
    }
}
