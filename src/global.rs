//! Builder shortcuts for the `aws:` global condition keys, each applying the
//! operator the key is documented to use when the caller names none. Any
//! other operator goes through [StatementBuilder::add_condition_op].

use crate::{operator::op, serutil::StringList, StatementBuilder};

impl StatementBuilder {
    /// `aws:CalledVia` — the ordered chain of services that made requests on
    /// the principal's behalf. Multivalued; matched with
    /// `ForAnyValue:StringEquals`.
    pub fn if_aws_called_via<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringEquals.for_any_value(), "aws:CalledVia", values)
    }

    /// `aws:CalledViaFirst` — the first service in the `aws:CalledVia` chain.
    pub fn if_aws_called_via_first<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:CalledViaFirst", values)
    }

    /// `aws:CalledViaLast` — the last service in the `aws:CalledVia` chain.
    pub fn if_aws_called_via_last<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:CalledViaLast", values)
    }

    /// `aws:CurrentTime` — the date and time of the request, matched with
    /// `DateLessThanEquals`. Accepts [chrono::DateTime] values directly.
    pub fn if_aws_current_time<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::DateLessThanEquals, "aws:CurrentTime", values)
    }

    /// `aws:EpochTime` — the request time in Unix time, matched with
    /// `DateLessThanEquals`.
    pub fn if_aws_epoch_time<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::DateLessThanEquals, "aws:EpochTime", values)
    }

    /// `aws:MultiFactorAuthAge` — seconds since the principal authenticated
    /// with MFA, matched with `NumericLessThan`. Absent when MFA was not
    /// used, so consider the `IfExists` form for Deny statements.
    pub fn if_aws_multi_factor_auth_age<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::NumericLessThan, "aws:MultiFactorAuthAge", values)
    }

    /// `aws:MultiFactorAuthPresent` — whether MFA validated the temporary
    /// credentials that made the request.
    pub fn if_aws_multi_factor_auth_present(&mut self, value: bool) -> &mut Self {
        self.add_condition_op(op::Bool, "aws:MultiFactorAuthPresent", value)
    }

    /// `aws:PrincipalAccount` — the account the requesting principal belongs to.
    pub fn if_aws_principal_account<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:PrincipalAccount", values)
    }

    /// `aws:PrincipalArn` — the ARN of the requesting principal, matched with
    /// `ArnLike`.
    pub fn if_aws_principal_arn<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::ArnLike, "aws:PrincipalArn", values)
    }

    /// `aws:PrincipalOrgID` — the AWS Organizations identifier of the
    /// requesting principal's organization.
    pub fn if_aws_principal_org_id<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:PrincipalOrgID", values)
    }

    /// `aws:PrincipalOrgPaths` — the Organizations entity path of the
    /// requesting principal.
    pub fn if_aws_principal_org_paths<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:PrincipalOrgPaths", values)
    }

    /// `aws:PrincipalTag/<key>` — a tag attached to the requesting principal.
    pub fn if_aws_principal_tag<K: AsRef<str>, V: Into<StringList>>(&mut self, key: K, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, format!("aws:PrincipalTag/{}", key.as_ref()), values)
    }

    /// `aws:PrincipalType` — `Account`, `User`, `FederatedUser`,
    /// `AssumedRole`, or `Anonymous`.
    pub fn if_aws_principal_type<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:PrincipalType", values)
    }

    /// `aws:Referer` — the HTTP referer header. Caller-supplied; not a
    /// trustworthy access control on its own.
    pub fn if_aws_referer<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:Referer", values)
    }

    /// `aws:RequestedRegion` — the region the request was made to.
    pub fn if_aws_requested_region<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:RequestedRegion", values)
    }

    /// `aws:RequestTag/<key>` — a tag key-value pair passed in the request.
    pub fn if_aws_request_tag<K: AsRef<str>, V: Into<StringList>>(&mut self, key: K, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, format!("aws:RequestTag/{}", key.as_ref()), values)
    }

    /// `aws:ResourceTag/<key>` — a tag attached to the requested resource.
    pub fn if_aws_resource_tag<K: AsRef<str>, V: Into<StringList>>(&mut self, key: K, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, format!("aws:ResourceTag/{}", key.as_ref()), values)
    }

    /// `aws:SecureTransport` — whether the request was sent over SSL.
    pub fn if_aws_secure_transport(&mut self, value: bool) -> &mut Self {
        self.add_condition_op(op::Bool, "aws:SecureTransport", value)
    }

    /// `aws:SourceAccount` — the account of the resource making a
    /// service-to-service request.
    pub fn if_aws_source_account<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:SourceAccount", values)
    }

    /// `aws:SourceArn` — the ARN of the resource making a service-to-service
    /// request, matched with `ArnLike`.
    pub fn if_aws_source_arn<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::ArnLike, "aws:SourceArn", values)
    }

    /// `aws:SourceIp` — the requester's IP address, matched with `IpAddress`.
    pub fn if_aws_source_ip<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::IpAddress, "aws:SourceIp", values)
    }

    /// `aws:SourceVpc` — the VPC the request came through.
    pub fn if_aws_source_vpc<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:SourceVpc", values)
    }

    /// `aws:SourceVpce` — the VPC endpoint the request came through.
    pub fn if_aws_source_vpce<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:SourceVpce", values)
    }

    /// `aws:TagKeys` — the tag keys present in the request.
    pub fn if_aws_tag_keys<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:TagKeys", values)
    }

    /// `aws:TokenIssueTime` — when the temporary credentials were issued,
    /// matched with `DateGreaterThanEquals`.
    pub fn if_aws_token_issue_time<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::DateGreaterThanEquals, "aws:TokenIssueTime", values)
    }

    /// `aws:UserAgent` — the requester's client application string.
    /// Caller-supplied; not a trustworthy access control on its own.
    pub fn if_aws_user_agent<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:UserAgent", values)
    }

    /// `aws:userid` — the requester's principal identifier.
    pub fn if_aws_userid<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:userid", values)
    }

    /// `aws:username` — the requester's user name.
    pub fn if_aws_username<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::StringLike, "aws:username", values)
    }

    /// `aws:ViaAWSService` — whether an AWS service made the request on the
    /// principal's behalf.
    pub fn if_aws_via_aws_service(&mut self, value: bool) -> &mut Self {
        self.add_condition_op(op::Bool, "aws:ViaAWSService", value)
    }

    /// `aws:VpcSourceIp` — the requester's IP address as seen through a VPC
    /// endpoint, matched with `IpAddress`.
    pub fn if_aws_vpc_source_ip<V: Into<StringList>>(&mut self, values: V) -> &mut Self {
        self.add_condition_op(op::IpAddress, "aws:VpcSourceIp", values)
    }
}

#[cfg(test)]
mod tests {
    use {
        chrono::{TimeZone, Utc},
        crate::{condop, serutil::StringList, StatementBuilder},
        pretty_assertions::assert_eq,
        serde_json::json,
    };

    #[test_log::test]
    fn test_default_operators() {
        let mut builder = StatementBuilder::for_service("s3");
        builder
            .add_action("GetObject")
            .if_aws_called_via("athena.amazonaws.com")
            .if_aws_source_ip(["203.0.113.0/24", "2001:db8::/32"])
            .if_aws_principal_arn("arn:aws:iam::123456789012:user/*")
            .if_aws_requested_region("us-east-1")
            .if_aws_multi_factor_auth_age(3600);
        let statement = builder.build().unwrap();

        assert_eq!(
            serde_json::to_value(statement.condition().unwrap()).unwrap(),
            json!({
                "ForAnyValue:StringEquals": {"aws:CalledVia": "athena.amazonaws.com"},
                "StringLike": {
                    "aws:PrincipalArn": "arn:aws:iam::123456789012:user/*",
                    "aws:RequestedRegion": "us-east-1"
                },
                "NumericLessThan": {"aws:MultiFactorAuthAge": "3600"},
                "IpAddress": {"aws:SourceIp": ["203.0.113.0/24", "2001:db8::/32"]}
            })
        );
    }

    #[test_log::test]
    fn test_principal_arn_uses_arn_like() {
        let mut builder = StatementBuilder::for_service("s3");
        builder.add_action("GetObject").if_aws_principal_arn("arn:aws:iam::123456789012:role/deploy");
        let statement = builder.build().unwrap();
        let condition = statement.condition().unwrap();
        assert_eq!(
            condition.get(&condop::ArnLike).unwrap()["aws:PrincipalArn"],
            StringList::from("arn:aws:iam::123456789012:role/deploy")
        );
    }

    #[test_log::test]
    fn test_bool_keys() {
        let mut builder = StatementBuilder::for_service("s3");
        builder
            .add_action("GetObject")
            .if_aws_secure_transport(true)
            .if_aws_multi_factor_auth_present(true)
            .if_aws_via_aws_service(false);
        let statement = builder.build().unwrap();

        assert_eq!(
            serde_json::to_value(statement.condition().unwrap()).unwrap(),
            json!({
                "Bool": {
                    "aws:MultiFactorAuthPresent": "true",
                    "aws:SecureTransport": "true",
                    "aws:ViaAWSService": "false"
                }
            })
        );
    }

    #[test_log::test]
    fn test_tag_key_interpolation() {
        let mut builder = StatementBuilder::for_service("ec2");
        builder
            .add_action("RunInstances")
            .if_aws_request_tag("Dept", "Accounting")
            .if_aws_resource_tag("Env", ["prod", "staging"])
            .if_aws_principal_tag("Team", "platform")
            .if_aws_tag_keys(["Dept", "Env"]);
        let statement = builder.build().unwrap();

        assert_eq!(
            serde_json::to_value(statement.condition().unwrap()).unwrap(),
            json!({
                "StringLike": {
                    "aws:PrincipalTag/Team": "platform",
                    "aws:RequestTag/Dept": "Accounting",
                    "aws:ResourceTag/Env": ["prod", "staging"],
                    "aws:TagKeys": ["Dept", "Env"]
                }
            })
        );
    }

    #[test_log::test]
    fn test_date_keys() {
        let mut builder = StatementBuilder::for_service("s3");
        builder
            .add_action("GetObject")
            .if_aws_current_time(Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap())
            .if_aws_token_issue_time("2020-01-01T00:00:00Z");
        let statement = builder.build().unwrap();

        assert_eq!(
            serde_json::to_value(statement.condition().unwrap()).unwrap(),
            json!({
                "DateLessThanEquals": {"aws:CurrentTime": "2020-04-01T00:00:00.000Z"},
                "DateGreaterThanEquals": {"aws:TokenIssueTime": "2020-01-01T00:00:00Z"}
            })
        );
    }
}
