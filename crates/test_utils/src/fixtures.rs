//! Pre-built Test Fixtures
//!
//! Claims extracts in the layout of the source CSV, sized for unit and
//! end-to-end tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Claims CSV fixtures
pub struct ClaimsCsvFixtures;

impl ClaimsCsvFixtures {
    /// Five claims with two deductible groups and two sexes
    ///
    /// Severities are `[100, 5000, 200, 15000, 300]` and deductibles
    /// `[500, 500, 1000, 1000, 500]`. Extra columns outside the allow-list are
    /// included so projection is exercised.
    pub fn five_claims() -> &'static str {
        "\
policy_number,age,insured_sex,policy_deductable,total_claim_amount,incident_city
521585,34,MALE,500,100,Columbus
342868,45,FEMALE,500,5000,Riverwood
687698,29,FEMALE,1000,200,Columbus
227811,52,MALE,1000,15000,Arlington
367455,41,MALE,500,300,Arlington
"
    }

    /// Twelve claims carrying every allow-listed column plus unrelated ones
    ///
    /// Row 4 has no severity and row 9 has no age.
    pub fn full_schema() -> &'static str {
        "\
months_as_customer,age,policy_number,policy_state,policy_csl,policy_deductable,policy_annual_premium,umbrella_limit,insured_sex,insured_education_level,insured_occupation,insured_hobbies,insured_relationship,incident_type,number_of_vehicles_involved,total_claim_amount,injury_claim,property_claim,vehicle_claim,auto_make,auto_year,fraud_reported
328,48,521585,OH,250/500,1000,1406.91,0,MALE,MD,craft-repair,sleeping,husband,Single Vehicle Collision,1,71610,6510,13020,52080,Saab,2004,Y
228,42,342868,IN,250/500,2000,1197.22,5000000,MALE,MD,machine-op-inspct,reading,other-relative,Vehicle Theft,1,5070,780,780,3510,Mercedes,2007,Y
134,29,687698,OH,100/300,2000,1413.14,5000000,FEMALE,PhD,sales,board-games,own-child,Multi-vehicle Collision,3,34650,7700,3850,23100,Dodge,2007,N
256,41,227811,IL,250/500,2000,1415.74,6000000,FEMALE,PhD,armed-forces,board-games,unmarried,Single Vehicle Collision,1,,6400,6400,50800,Chevrolet,2014,Y
228,44,367455,IL,500/1000,1000,1583.91,6000000,MALE,Associate,sales,board-games,unmarried,Vehicle Theft,1,6500,1300,650,4550,Accura,2009,N
256,39,104594,OH,250/500,1000,1351.10,0,FEMALE,PhD,tech-support,bungie-jumping,unmarried,Multi-vehicle Collision,3,64100,6410,6410,51280,Saab,2003,Y
137,34,413978,IN,250/500,1000,1333.35,0,MALE,PhD,prof-specialty,board-games,husband,Multi-vehicle Collision,3,78650,21450,7150,50050,Nissan,2012,N
165,37,429027,IL,100/300,1000,1137.03,0,MALE,Associate,tech-support,base-jumping,unmarried,Multi-vehicle Collision,1,51590,9380,9380,32830,Audi,2015,N
27,,485665,IL,100/300,500,1442.99,0,FEMALE,PhD,other-service,golf,own-child,Single Vehicle Collision,1,27700,2770,2770,22160,Toyota,2012,N
212,40,636550,IL,100/300,500,1315.68,0,MALE,PhD,priv-house-serv,camping,wife,Single Vehicle Collision,1,42300,4700,4700,32900,Saab,1996,N
235,42,543610,OH,100/300,500,1253.12,4000000,FEMALE,Masters,sales,reading,unmarried,Single Vehicle Collision,1,87010,7910,15820,63280,Toyota,2002,N
447,61,214618,OH,100/300,2000,1137.16,0,FEMALE,High School,exec-managerial,hiking,husband,Parked Car,1,114920,17680,17680,79560,Dodge,1999,N
"
    }

    /// A file whose severity column is absent
    pub fn without_severity() -> &'static str {
        "\
age,insured_sex,policy_deductable
34,MALE,500
45,FEMALE,1000
"
    }

    /// Claims where every policyholder has the same sex
    pub fn single_sex() -> &'static str {
        "\
age,insured_sex,policy_deductable,total_claim_amount
34,MALE,500,1200
45,MALE,500,5000
29,MALE,1000,2200
52,MALE,1000,15000
41,MALE,500,3300
38,MALE,2000,800
"
    }
}

/// Writes `contents` to `dir/name` and returns the path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// A temporary working directory holding one claims fixture
pub struct FixtureDir {
    pub dir: TempDir,
    pub input: PathBuf,
}

impl FixtureDir {
    /// Creates a temp dir with `contents` at `data/insurance_claims.csv`
    pub fn with_claims(contents: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let data_dir = dir.path().join("data");
        fs::create_dir_all(&data_dir).expect("failed to create data dir");
        let input = write_fixture(&data_dir, "insurance_claims.csv", contents);
        Self { dir, input }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
